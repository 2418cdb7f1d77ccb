// Per-engine commentary over the aggregate statistics.

use crate::config::ReportMode;
use crate::findings::Finding;
use crate::stats::{AggregateStats, percent};
use vantage_scanner::PageSignal;

pub const ENGINES: [&str; 5] = ["ChatGPT", "Claude", "Gemini", "Copilot", "Perplexity"];

/// One observation an engine can make. The wording is fixed per clause;
/// which variant is used depends on the stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Context,
    Structure,
    Markup,
    Linking,
    Trust,
    Reach,
}

impl Clause {
    fn holds(self, s: &AggregateStats) -> bool {
        match self {
            Clause::Context => s.avg_word_count >= 500.0,
            Clause::Structure => s.single_h1_fraction >= 0.8 && s.avg_h2_count >= 1.0,
            Clause::Markup => s.schema_fraction >= 0.5,
            Clause::Linking => s.avg_internal_links >= 3.0,
            Clause::Trust => s.https_fraction >= 1.0 && s.has_contact(),
            Clause::Reach => s.total_social_links > 0 || s.avg_external_links >= 1.0,
        }
    }

    fn phrase(self, s: &AggregateStats) -> &'static str {
        match (self, self.holds(s)) {
            (Clause::Context, true) => "ample surrounding copy for context",
            (Clause::Context, false) => "lean pockets of copy",
            (Clause::Structure, true) => "a clean heading outline",
            (Clause::Structure, false) => "a loose heading outline",
            (Clause::Markup, true) => "machine-readable schema on most pages",
            (Clause::Markup, false) => "little machine-readable schema",
            (Clause::Linking, true) if s.avg_internal_links >= 6.0 => "dense internal pathways",
            (Clause::Linking, true) => "workable internal pathways",
            (Clause::Linking, false) => "sparse internal pathways",
            (Clause::Trust, true) => "solid trust markers",
            (Clause::Trust, false) if s.https_fraction >= 1.0 => "secure pages with thin contact cues",
            (Clause::Trust, false) => "mixed security signals",
            (Clause::Reach, true) => "visible ties to outside sources",
            (Clause::Reach, false) => "few ties to outside sources",
        }
    }

    fn detail(self, s: &AggregateStats) -> String {
        match self {
            Clause::Context => format!(
                "Pages average {:.0} words of visible text, which reads as {}.",
                s.avg_word_count,
                self.phrase(s)
            ),
            Clause::Structure => format!(
                "{} of pages carry a single H1 with {:.1} H2 sections on average, giving {}.",
                percent(s.single_h1_fraction),
                s.avg_h2_count,
                self.phrase(s)
            ),
            Clause::Markup => format!(
                "Structured data appears on {} of pages, so the engine sees {}.",
                percent(s.schema_fraction),
                self.phrase(s)
            ),
            Clause::Linking => format!(
                "An average of {:.1} internal links per page makes for {}.",
                s.avg_internal_links,
                self.phrase(s)
            ),
            Clause::Trust => format!(
                "With {} of pages on HTTPS and contact details {}, the site shows {}.",
                percent(s.https_fraction),
                if s.has_contact() { "present" } else { "scarce" },
                self.phrase(s)
            ),
            Clause::Reach => format!(
                "The crawl counted {} social links and {:.1} outbound links per page, which shows {}.",
                s.total_social_links,
                s.avg_external_links,
                self.phrase(s)
            ),
        }
    }
}

struct EngineProfile {
    name: &'static str,
    lens: &'static str,
    clauses: &'static [Clause],
    closing: &'static str,
    unable: &'static str,
}

const PROFILES: [EngineProfile; 5] = [
    EngineProfile {
        name: "ChatGPT",
        lens: "reads",
        clauses: &[Clause::Context, Clause::Structure, Clause::Markup],
        closing: "Conversational answers lean on pages that explain themselves in plain language.",
        unable: "ChatGPT could not analyze this site because no pages were reachable during the crawl.",
    },
    EngineProfile {
        name: "Claude",
        lens: "works through",
        clauses: &[Clause::Context, Clause::Structure, Clause::Trust, Clause::Linking],
        closing: "Careful summaries favor pages whose sections build on one another.",
        unable: "Claude had no page content to work through because the crawl returned nothing.",
    },
    EngineProfile {
        name: "Gemini",
        lens: "indexes",
        clauses: &[Clause::Markup, Clause::Linking, Clause::Reach],
        closing: "Search-grounded answers reward sites that connect their entities clearly.",
        unable: "Gemini found nothing to index because the site did not respond with readable pages.",
    },
    EngineProfile {
        name: "Copilot",
        lens: "scans",
        clauses: &[Clause::Structure, Clause::Trust],
        closing: "Quick answers pull from pages with an obvious outline and a trustworthy frame.",
        unable: "Copilot was unable to scan this site because the crawl did not retrieve any pages.",
    },
    EngineProfile {
        name: "Perplexity",
        lens: "cites from",
        clauses: &[Clause::Reach, Clause::Markup, Clause::Context, Clause::Trust],
        closing: "Citation-first answers prefer sources that are easy to quote and easy to verify.",
        unable: "Perplexity had no sources to cite because no pages could be crawled.",
    },
];

/// Five entries in engine order, for any crawl size.
pub fn format_insights(pages: &[PageSignal], host: &str, mode: ReportMode) -> Vec<Finding> {
    if pages.is_empty() {
        return unable_insights();
    }
    format_from_stats(&AggregateStats::from_pages(pages), host, mode)
}

pub fn format_from_stats(stats: &AggregateStats, host: &str, mode: ReportMode) -> Vec<Finding> {
    if stats.is_empty() {
        return unable_insights();
    }
    PROFILES
        .iter()
        .map(|profile| {
            let text = match mode {
                ReportMode::Short => compact(profile, stats, host),
                ReportMode::Long => extended(profile, stats, host),
            };
            Finding::new(profile.name, text)
        })
        .collect()
}

pub fn unable_insights() -> Vec<Finding> {
    PROFILES
        .iter()
        .map(|profile| Finding::new(profile.name, profile.unable))
        .collect()
}

fn compact(profile: &EngineProfile, stats: &AggregateStats, host: &str) -> String {
    let phrases: Vec<&str> = profile.clauses.iter().map(|c| c.phrase(stats)).collect();
    format!(
        "{} {} {} and finds {}. {}",
        profile.name,
        profile.lens,
        host,
        join_phrases(&phrases),
        profile.closing
    )
}

fn extended(profile: &EngineProfile, stats: &AggregateStats, host: &str) -> String {
    let mut first = format!(
        "{} {} {} across {} pages.",
        profile.name, profile.lens, host, stats.page_count
    );
    for clause in profile.clauses {
        first.push(' ');
        first.push_str(&clause.detail(stats));
    }

    let holding = profile.clauses.iter().filter(|c| c.holds(stats)).count();
    let outlook = if holding == profile.clauses.len() {
        "The overall picture is a site this engine can draw on with confidence."
    } else if holding * 2 >= profile.clauses.len() {
        "The overall picture is a usable source with visible gaps."
    } else {
        "The overall picture is a source this engine is likely to pass over for clearer ones."
    };

    format!("{}\n\n{} {}", first, profile.closing, outlook)
}

fn join_phrases(phrases: &[&str]) -> String {
    match phrases {
        [] => String::new(),
        [one] => one.to_string(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_follow_engine_order() {
        let names: Vec<&str> = PROFILES.iter().map(|p| p.name).collect();
        assert_eq!(names, ENGINES);
    }

    #[test]
    fn test_profiles_use_two_to_four_clauses() {
        for profile in &PROFILES {
            assert!((2..=4).contains(&profile.clauses.len()), "{}", profile.name);
        }
    }

    #[test]
    fn test_context_clause_switches_on_word_count() {
        let rich = AggregateStats {
            page_count: 1,
            avg_word_count: 800.0,
            ..Default::default()
        };
        let lean = AggregateStats {
            page_count: 1,
            avg_word_count: 120.0,
            ..Default::default()
        };
        assert_eq!(Clause::Context.phrase(&rich), "ample surrounding copy for context");
        assert_eq!(Clause::Context.phrase(&lean), "lean pockets of copy");
    }

    #[test]
    fn test_join_phrases() {
        assert_eq!(join_phrases(&["a", "b"]), "a and b");
        assert_eq!(join_phrases(&["a", "b", "c"]), "a, b, and c");
    }
}
