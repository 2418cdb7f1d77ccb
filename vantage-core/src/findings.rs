// Finding synthesis: check catalogue -> dedup -> target sizing -> polish.

use crate::config::{HostOverrides, ReportMode};
use crate::polish::polish;
use crate::score;
use crate::stats::{AggregateStats, ISOLATED_PAGE_LINKS, THIN_PAGE_WORDS, percent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vantage_scanner::PageSignal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub title: String,
    pub description: String,
}

impl Finding {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Dedup key: trimmed, case-insensitive title.
    pub fn key(&self) -> String {
        title_key(&self.title)
    }
}

pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingSet {
    pub working: Vec<Finding>,
    pub needs_attention: Vec<Finding>,
}

impl FindingSet {
    /// The single-entry set reported when no page could be crawled.
    pub fn crawl_failed(host: &str, mode: ReportMode) -> Self {
        let finding = Finding::new(
            "Site could not be crawled",
            format!(
                "No pages on {} responded with readable HTML during the crawl. \
                 The homepage may be offline, blocking automated visitors, or redirecting off the host. \
                 Scores and findings are withheld until at least one page can be read.",
                host
            ),
        );
        Self {
            working: Vec::new(),
            needs_attention: vec![Finding::new(
                finding.title,
                polish(&finding.description, mode, 0),
            )],
        }
    }

    /// The single-entry set reported when the crawl could not start.
    pub fn crawl_aborted(host: &str, mode: ReportMode) -> Self {
        let description = format!(
            "The crawl of {} stopped before any page could be requested. \
             The address may be malformed, or the HTTP client could not be set up. \
             Scores and findings are withheld until the crawl can run.",
            host
        );
        Self {
            working: Vec::new(),
            needs_attention: vec![Finding::new(
                "Crawl could not start",
                polish(&description, mode, 0),
            )],
        }
    }
}

/// Target list lengths `(working, needs_attention)` for a mode and score.
pub fn targets(mode: ReportMode, score: u32) -> (usize, usize) {
    match mode {
        ReportMode::Short => (5, 10),
        ReportMode::Long if score < 60 => (5, 25),
        ReportMode::Long if score < 80 => (7, 20),
        ReportMode::Long => (10, 15),
    }
}

pub fn synthesize(
    pages: &[PageSignal],
    host: &str,
    mode: ReportMode,
    overrides: &HostOverrides,
) -> FindingSet {
    if pages.is_empty() {
        return FindingSet::crawl_failed(host, mode);
    }
    let stats = AggregateStats::from_pages(pages);
    let quality = score::evaluate_stats(&stats, host, overrides);
    synthesize_from_stats(&stats, host, mode, quality.score)
}

pub fn synthesize_from_stats(
    stats: &AggregateStats,
    host: &str,
    mode: ReportMode,
    score: u32,
) -> FindingSet {
    if stats.is_empty() {
        return FindingSet::crawl_failed(host, mode);
    }

    let (mut working, mut needs_attention) = candidates(stats, host, mode);
    let (working_target, needs_target) = targets(mode, score);

    fit_to_target(&mut working, working_target, WORKING_SEEDS, stats, host);
    fit_to_target(&mut needs_attention, needs_target, NEEDS_SEEDS, stats, host);

    FindingSet {
        working: polish_all(working, mode),
        needs_attention: polish_all(needs_attention, mode),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Working,
    NeedsAttention,
}

struct Candidate {
    verdict: Verdict,
    finding: Finding,
}

fn working(title: &str, description: String) -> Candidate {
    Candidate {
        verdict: Verdict::Working,
        finding: Finding::new(title, description),
    }
}

fn needs(title: &str, description: String) -> Candidate {
    Candidate {
        verdict: Verdict::NeedsAttention,
        finding: Finding::new(title, description),
    }
}

struct Check {
    long_only: bool,
    run: fn(&AggregateStats, &str) -> Candidate,
}

const fn check(run: fn(&AggregateStats, &str) -> Candidate) -> Check {
    Check {
        long_only: false,
        run,
    }
}

const fn long_check(run: fn(&AggregateStats, &str) -> Candidate) -> Check {
    Check {
        long_only: true,
        run,
    }
}

/// Catalogue order is output order.
const CHECKS: &[Check] = &[
    check(https_coverage),
    check(title_coverage),
    check(title_length),
    check(title_duplication),
    check(meta_description_coverage),
    check(heading_singularity),
    check(internal_link_density),
    check(isolated_pages),
    check(schema_coverage),
    check(alt_text_coverage),
    check(breadcrumb_coverage),
    check(nav_footer_consistency),
    check(content_depth),
    check(thin_content),
    check(contact_presence),
    check(social_presence),
    check(external_link_density),
    long_check(subheading_structure),
    long_check(content_consistency),
    long_check(conversion_paths),
    long_check(url_depth),
];

/// Runs the catalogue and splits results by verdict, keeping the first
/// finding for each title.
fn candidates(stats: &AggregateStats, host: &str, mode: ReportMode) -> (Vec<Finding>, Vec<Finding>) {
    let mut working = Vec::new();
    let mut needs_attention = Vec::new();
    let mut working_keys = HashSet::new();
    let mut needs_keys = HashSet::new();

    for check in CHECKS {
        if check.long_only && mode == ReportMode::Short {
            continue;
        }
        let candidate = (check.run)(stats, host);
        let (list, keys) = match candidate.verdict {
            Verdict::Working => (&mut working, &mut working_keys),
            Verdict::NeedsAttention => (&mut needs_attention, &mut needs_keys),
        };
        if keys.insert(candidate.finding.key()) {
            list.push(candidate.finding);
        }
    }

    (working, needs_attention)
}

/// Truncates a list to `target` or fills it with seed findings.
///
/// Seeds cycle in order; each full cycle after the first appends a
/// version suffix so titles stay unique. Generation is keyed on position
/// only, so the same inputs always produce the same list.
fn fit_to_target(
    list: &mut Vec<Finding>,
    target: usize,
    seeds: &[Seed],
    stats: &AggregateStats,
    host: &str,
) {
    if list.len() >= target {
        list.truncate(target);
        return;
    }

    let mut keys: HashSet<String> = list.iter().map(Finding::key).collect();
    let mut index = 0;
    while list.len() < target {
        let seed = &seeds[index % seeds.len()];
        let cycle = index / seeds.len();
        let title = if cycle == 0 {
            seed.title.to_string()
        } else {
            format!("{} (v{})", seed.title, cycle + 1)
        };
        if keys.insert(title_key(&title)) {
            list.push(Finding::new(title, (seed.describe)(stats, host)));
        }
        index += 1;
    }
}

fn polish_all(findings: Vec<Finding>, mode: ReportMode) -> Vec<Finding> {
    findings
        .into_iter()
        .enumerate()
        .map(|(index, finding)| Finding {
            description: polish(&finding.description, mode, index),
            title: finding.title,
        })
        .collect()
}

// ============================================================================
// Signal checks
// ============================================================================

fn https_coverage(s: &AggregateStats, host: &str) -> Candidate {
    if s.https_fraction >= 1.0 {
        working(
            "HTTPS across every page",
            format!(
                "All {} crawled pages on {} load over HTTPS. \
                 Browsers show the secure indicator throughout a visit. \
                 No mixed-scheme pages turned up in the sample.",
                s.page_count, host
            ),
        )
    } else {
        needs(
            "Pages served without HTTPS",
            format!(
                "{} of {} crawled pages on {} load over plain HTTP. \
                 Visitors on those pages see a not-secure warning. \
                 Every URL should redirect to its HTTPS version.",
                s.page_count - s.https_page_count,
                s.page_count,
                host
            ),
        )
    }
}

fn title_coverage(s: &AggregateStats, _host: &str) -> Candidate {
    if s.title_fraction >= 1.0 {
        working(
            "Every page has a title",
            format!(
                "All {} pages declare a document title. \
                 Titles give search results and browser tabs a clear label.",
                s.page_count
            ),
        )
    } else {
        needs(
            "Missing page titles",
            format!(
                "{} of {} pages have no document title. \
                 Search results fall back to guessed labels for those pages. \
                 Each page should carry a unique, descriptive title.",
                s.page_count - s.titled_page_count,
                s.page_count
            ),
        )
    }
}

fn title_length(s: &AggregateStats, _host: &str) -> Candidate {
    let off_length = s.short_title_count + s.long_title_count;
    if s.titled_page_count > 0 && off_length * 4 <= s.titled_page_count {
        working(
            "Title lengths in a readable range",
            format!(
                "Titles average {:.0} characters. \
                 Most fall between 30 and 60 characters, so they display without truncation.",
                s.avg_title_length
            ),
        )
    } else {
        needs(
            "Title lengths outside the readable range",
            format!(
                "{} titles are shorter than 30 characters and {} run past 60. \
                 Short titles undersell the page while long ones get cut off in results. \
                 Titles average {:.0} characters across the crawl.",
                s.short_title_count, s.long_title_count, s.avg_title_length
            ),
        )
    }
}

fn title_duplication(s: &AggregateStats, _host: &str) -> Candidate {
    if s.duplicate_title_count == 0 {
        working(
            "Distinct titles per page",
            format!(
                "None of the {} titled pages repeat another page's title. \
                 Each result can be told apart at a glance.",
                s.titled_page_count
            ),
        )
    } else {
        needs(
            "Duplicate page titles",
            format!(
                "{} pages share a title with at least one other page. \
                 Duplicate titles blur which page answers which query. \
                 Each page should describe its own topic.",
                s.duplicate_title_count
            ),
        )
    }
}

fn meta_description_coverage(s: &AggregateStats, _host: &str) -> Candidate {
    if s.meta_description_fraction >= 0.8 {
        working(
            "Meta descriptions in place",
            format!(
                "{} of pages carry a meta description. \
                 Search snippets can quote a summary the site wrote itself.",
                percent(s.meta_description_fraction)
            ),
        )
    } else {
        needs(
            "Meta descriptions missing",
            format!(
                "Only {} of pages carry a meta description. \
                 Search engines improvise a snippet from page text when it is absent. \
                 You should add a short summary to each key page.",
                percent(s.meta_description_fraction)
            ),
        )
    }
}

fn heading_singularity(s: &AggregateStats, _host: &str) -> Candidate {
    if s.single_h1_fraction >= 0.8 {
        working(
            "One main heading per page",
            format!(
                "{} of pages use exactly one H1. \
                 Each page announces a single primary topic.",
                percent(s.single_h1_fraction)
            ),
        )
    } else {
        needs(
            "Main heading structure is inconsistent",
            format!(
                "{} pages have no H1 and {} have more than one. \
                 A single H1 tells readers and crawlers what the page is about. \
                 Only {} of pages follow that pattern today.",
                s.missing_h1_count,
                s.multiple_h1_count,
                percent(s.single_h1_fraction)
            ),
        )
    }
}

fn internal_link_density(s: &AggregateStats, _host: &str) -> Candidate {
    if s.avg_internal_links >= 3.0 {
        working(
            "Healthy internal linking",
            format!(
                "Pages average {:.1} internal links. \
                 Visitors and crawlers have several paths onward from each page.",
                s.avg_internal_links
            ),
        )
    } else {
        needs(
            "Thin internal linking",
            format!(
                "Pages average only {:.1} internal links. \
                 Sparse linking leaves deeper pages hard to discover. \
                 Related pages should link to each other in the body copy.",
                s.avg_internal_links
            ),
        )
    }
}

fn isolated_pages(s: &AggregateStats, _host: &str) -> Candidate {
    if s.isolated_page_count == 0 {
        working(
            "No dead-end pages",
            format!(
                "Every crawled page links to at least {} other pages on the site. \
                 No page leaves a visitor without a next step.",
                ISOLATED_PAGE_LINKS
            ),
        )
    } else {
        needs(
            "Dead-end pages",
            format!(
                "{} of {} pages link to fewer than {} other pages on the site. \
                 Visitors who land there have few ways to continue. \
                 These pages also pass little context to the rest of the site.",
                s.isolated_page_count, s.page_count, ISOLATED_PAGE_LINKS
            ),
        )
    }
}

fn schema_coverage(s: &AggregateStats, _host: &str) -> Candidate {
    if s.schema_fraction >= 0.5 {
        working(
            "Structured data present",
            format!(
                "{} of pages include JSON-LD or microdata. \
                 Machines can read entities and page types without guessing.",
                percent(s.schema_fraction)
            ),
        )
    } else {
        needs(
            "Little structured data",
            format!(
                "Only {} of pages include JSON-LD or microdata. \
                 Without it, answer engines infer the business, products, and articles from prose alone. \
                 You should implement schema on the homepage and key templates.",
                percent(s.schema_fraction)
            ),
        )
    }
}

fn alt_text_coverage(s: &AggregateStats, _host: &str) -> Candidate {
    if s.alt_coverage >= 0.9 {
        working(
            "Images described with alt text",
            format!(
                "{} of {} images carry alt text. \
                 Screen readers and image search both get a description.",
                s.total_images_with_alt, s.total_images
            ),
        )
    } else {
        needs(
            "Images missing alt text",
            format!(
                "{} of {} images have no alt text. \
                 Those images are invisible to screen readers and image search. \
                 Descriptive alt text should accompany every meaningful image.",
                s.total_images - s.total_images_with_alt,
                s.total_images
            ),
        )
    }
}

fn breadcrumb_coverage(s: &AggregateStats, _host: &str) -> Candidate {
    if s.breadcrumb_fraction >= 0.5 {
        working(
            "Breadcrumb trails in use",
            format!(
                "{} of pages show a breadcrumb trail. \
                 Visitors can see where a page sits in the site hierarchy.",
                percent(s.breadcrumb_fraction)
            ),
        )
    } else {
        needs(
            "Few breadcrumb trails",
            format!(
                "Only {} of pages show a breadcrumb trail. \
                 Deeper pages give little sense of where they sit in the site. \
                 Breadcrumbs also feed hierarchy hints to search results.",
                percent(s.breadcrumb_fraction)
            ),
        )
    }
}

fn nav_footer_consistency(s: &AggregateStats, _host: &str) -> Candidate {
    if s.nav_fraction >= 0.9 && s.footer_fraction >= 0.9 {
        working(
            "Consistent navigation and footer",
            format!(
                "Navigation appears on {} of pages and a footer on {}. \
                 The site frame stays the same as visitors move around.",
                percent(s.nav_fraction),
                percent(s.footer_fraction)
            ),
        )
    } else {
        needs(
            "Inconsistent navigation or footer",
            format!(
                "Navigation landmarks appear on {} of pages and footers on {}. \
                 Pages without them feel detached from the rest of the site. \
                 A shared layout must carry both on every template.",
                percent(s.nav_fraction),
                percent(s.footer_fraction)
            ),
        )
    }
}

fn content_depth(s: &AggregateStats, _host: &str) -> Candidate {
    if s.avg_word_count >= 400.0 {
        working(
            "Substantial page content",
            format!(
                "Pages average {:.0} words of visible text. \
                 There is enough copy for readers and answer engines to work with.",
                s.avg_word_count
            ),
        )
    } else {
        needs(
            "Light page content",
            format!(
                "Pages average {:.0} words of visible text. \
                 Short pages give answer engines little to quote or summarize. \
                 Key pages need to explain their topic in more depth.",
                s.avg_word_count
            ),
        )
    }
}

fn thin_content(s: &AggregateStats, _host: &str) -> Candidate {
    if s.thin_fraction <= 0.25 {
        working(
            "Few thin pages",
            format!(
                "{} of {} pages fall under {} words. \
                 Most of the site carries real substance.",
                s.thin_page_count, s.page_count, THIN_PAGE_WORDS
            ),
        )
    } else {
        needs(
            "Many thin pages",
            format!(
                "{} of {} pages fall under {} words. \
                 Thin pages rarely rank or get cited on their own. \
                 Merging or expanding them concentrates the signal.",
                s.thin_page_count, s.page_count, THIN_PAGE_WORDS
            ),
        )
    }
}

fn contact_presence(s: &AggregateStats, _host: &str) -> Candidate {
    let mut channels = Vec::new();
    if s.has_phone {
        channels.push("phone");
    }
    if s.has_email {
        channels.push("email");
    }
    if s.has_address {
        channels.push("postal address");
    }

    if channels.len() >= 2 {
        working(
            "Contact details visible",
            format!(
                "The crawl found {} contact details. \
                 Visitors and engines can confirm there is a real organization behind the site.",
                channels.join(" and ")
            ),
        )
    } else {
        needs(
            "Contact details hard to find",
            format!(
                "The crawl found {} contact channel(s) across the sampled pages. \
                 Clickable phone, email, and address details build trust with visitors. \
                 They also help engines verify the organization.",
                channels.len()
            ),
        )
    }
}

fn social_presence(s: &AggregateStats, _host: &str) -> Candidate {
    if s.total_social_links > 0 {
        working(
            "Social profiles linked",
            format!(
                "{} links point to social profiles. \
                 These connect the site to the wider presence of the brand.",
                s.total_social_links
            ),
        )
    } else {
        needs(
            "No social profile links",
            "None of the crawled pages link to a social profile. \
             Profile links help engines connect the site to the same organization elsewhere."
                .to_string(),
        )
    }
}

fn external_link_density(s: &AggregateStats, _host: &str) -> Candidate {
    if s.avg_external_links <= 15.0 {
        working(
            "Balanced outbound linking",
            format!(
                "Pages average {:.1} external links. \
                 Outbound references stay proportionate to the content.",
                s.avg_external_links
            ),
        )
    } else {
        needs(
            "Heavy outbound linking",
            format!(
                "Pages average {:.1} external links. \
                 Large link lists dilute the focus of each page. \
                 Outbound links should point to sources that support the copy.",
                s.avg_external_links
            ),
        )
    }
}

fn subheading_structure(s: &AggregateStats, _host: &str) -> Candidate {
    if s.avg_h2_count >= 2.0 {
        working(
            "Content broken into sections",
            format!(
                "Pages average {:.1} H2 and {:.1} H3 subheadings. \
                 Readers can scan for the part they need.",
                s.avg_h2_count, s.avg_h3_count
            ),
        )
    } else {
        needs(
            "Few subheadings",
            format!(
                "Pages average {:.1} H2 subheadings. \
                 Long copy without sections is hard to scan and hard to excerpt. \
                 Subheadings should mark each distinct idea.",
                s.avg_h2_count
            ),
        )
    }
}

fn content_consistency(s: &AggregateStats, _host: &str) -> Candidate {
    if s.word_count_variation() <= 0.75 {
        working(
            "Even content depth",
            format!(
                "Page length varies by {:.0} words around a {:.0}-word average. \
                 Depth is consistent from one page to the next.",
                s.word_count_std_dev, s.avg_word_count
            ),
        )
    } else {
        needs(
            "Uneven content depth",
            format!(
                "Page length varies by {:.0} words around a {:.0}-word average. \
                 A few long pages carry most of the content while others say little.",
                s.word_count_std_dev, s.avg_word_count
            ),
        )
    }
}

fn conversion_paths(s: &AggregateStats, _host: &str) -> Candidate {
    if s.total_forms > 0 || s.total_buttons >= s.page_count {
        working(
            "Clear calls to action",
            format!(
                "The crawl found {} forms and {} buttons. \
                 Visitors have obvious ways to act on what they read.",
                s.total_forms, s.total_buttons
            ),
        )
    } else {
        needs(
            "Few calls to action",
            format!(
                "The crawl found {} forms and {} buttons across {} pages. \
                 Interested visitors have few obvious ways to act.",
                s.total_forms, s.total_buttons, s.page_count
            ),
        )
    }
}

fn url_depth(s: &AggregateStats, _host: &str) -> Candidate {
    if s.avg_depth <= 2.0 {
        working(
            "Shallow URL structure",
            format!(
                "Crawled pages sit {:.1} path segments deep on average. \
                 Important content is only a few clicks from the homepage.",
                s.avg_depth
            ),
        )
    } else {
        needs(
            "Deep URL structure",
            format!(
                "Crawled pages sit {:.1} path segments deep on average. \
                 Deeply nested pages get crawled less often and are harder to reach.",
                s.avg_depth
            ),
        )
    }
}

// ============================================================================
// Filler seeds
// ============================================================================

struct Seed {
    title: &'static str,
    describe: fn(&AggregateStats, &str) -> String,
}

const WORKING_SEEDS: &[Seed] = &[
    Seed {
        title: "Crawl coverage snapshot",
        describe: |s, host| {
            format!(
                "The crawl reached {} pages on {}. \
                 Every figure in this report draws on that sample.",
                s.page_count, host
            )
        },
    },
    Seed {
        title: "Page length profile",
        describe: |s, _| {
            format!(
                "Pages average {:.0} words of visible text. \
                 Lengths spread {:.0} words around that average.",
                s.avg_word_count, s.word_count_std_dev
            )
        },
    },
    Seed {
        title: "Internal link baseline",
        describe: |s, _| {
            format!(
                "Pages carry {:.1} internal links on average. \
                 That figure sets the baseline for how pages reach each other.",
                s.avg_internal_links
            )
        },
    },
    Seed {
        title: "Heading inventory",
        describe: |s, _| {
            format!(
                "Pages average {:.1} H2 and {:.1} H3 headings. \
                 {} pages use a single H1.",
                s.avg_h2_count, s.avg_h3_count, s.single_h1_count
            )
        },
    },
    Seed {
        title: "Image inventory",
        describe: |s, _| {
            format!(
                "The crawl counted {} images. \
                 Of those, {} carry alt text.",
                s.total_images, s.total_images_with_alt
            )
        },
    },
    Seed {
        title: "Navigation landmarks",
        describe: |s, _| {
            format!(
                "Navigation landmarks appear on {} of pages. \
                 Footers appear on {}.",
                percent(s.nav_fraction),
                percent(s.footer_fraction)
            )
        },
    },
    Seed {
        title: "Secure page share",
        describe: |s, _| {
            format!(
                "{} of {} pages load over HTTPS. \
                 Secure delivery is part of the trust picture.",
                s.https_page_count, s.page_count
            )
        },
    },
    Seed {
        title: "Path depth profile",
        describe: |s, _| {
            format!(
                "Crawled URLs average {:.1} path segments. \
                 The site hierarchy stays within three levels in this sample.",
                s.avg_depth
            )
        },
    },
];

const NEEDS_SEEDS: &[Seed] = &[
    Seed {
        title: "Coverage beyond the crawl sample",
        describe: |s, host| {
            format!(
                "This reading covers {} pages on {}. \
                 Sections beyond the sample may carry different signals.",
                s.page_count, host
            )
        },
    },
    Seed {
        title: "Title length spread",
        describe: |s, _| {
            format!(
                "Titles average {:.0} characters. \
                 {} run short and {} run long.",
                s.avg_title_length, s.short_title_count, s.long_title_count
            )
        },
    },
    Seed {
        title: "Meta description reach",
        describe: |s, _| {
            format!(
                "{} pages carry a meta description. \
                 That is {} of the crawled set.",
                s.meta_description_count,
                percent(s.meta_description_fraction)
            )
        },
    },
    Seed {
        title: "Link distribution spread",
        describe: |s, _| {
            format!(
                "Internal link counts spread {:.1} links around a {:.1}-link average. \
                 Some pages are far better connected than others.",
                s.internal_link_std_dev, s.avg_internal_links
            )
        },
    },
    Seed {
        title: "Structured data reach",
        describe: |s, _| {
            format!(
                "{} pages carry structured data. \
                 The remaining {} rely on prose alone.",
                s.schema_page_count,
                s.page_count - s.schema_page_count
            )
        },
    },
    Seed {
        title: "Thin page watch",
        describe: |s, _| {
            format!(
                "{} pages fall under {} words. \
                 Short pages are the first to drop out of answer summaries.",
                s.thin_page_count, THIN_PAGE_WORDS
            )
        },
    },
    Seed {
        title: "Breadcrumb reach",
        describe: |s, _| {
            format!(
                "Breadcrumb trails appear on {} of pages. \
                 Hierarchy cues matter most on deeper pages.",
                percent(s.breadcrumb_fraction)
            )
        },
    },
    Seed {
        title: "Outbound link balance",
        describe: |s, _| {
            format!(
                "Pages average {:.1} external links. \
                 Outbound references shape how engines place the site among its sources.",
                s.avg_external_links
            )
        },
    },
    Seed {
        title: "Image description reach",
        describe: |s, _| {
            format!(
                "Alt text covers {} of images. \
                 Undescribed images add nothing to what engines read.",
                percent(s.alt_coverage)
            )
        },
    },
    Seed {
        title: "Trust signal reach",
        describe: |s, _| {
            format!(
                "The crawl found {} social profile links. \
                 Contact details appear through {} channel types.",
                s.total_social_links,
                [s.has_phone, s.has_email, s.has_address]
                    .iter()
                    .filter(|present| **present)
                    .count()
            )
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_by_mode_and_band() {
        assert_eq!(targets(ReportMode::Short, 30), (5, 10));
        assert_eq!(targets(ReportMode::Short, 95), (5, 10));
        assert_eq!(targets(ReportMode::Long, 59), (5, 25));
        assert_eq!(targets(ReportMode::Long, 60), (7, 20));
        assert_eq!(targets(ReportMode::Long, 79), (7, 20));
        assert_eq!(targets(ReportMode::Long, 80), (10, 15));
    }

    #[test]
    fn test_fill_cycles_with_version_suffix() {
        let stats = AggregateStats {
            page_count: 1,
            ..Default::default()
        };
        let mut list = Vec::new();
        fit_to_target(&mut list, WORKING_SEEDS.len() * 2 + 1, WORKING_SEEDS, &stats, "example.com");

        assert_eq!(list.len(), WORKING_SEEDS.len() * 2 + 1);
        assert_eq!(list[0].title, WORKING_SEEDS[0].title);
        assert_eq!(list[WORKING_SEEDS.len()].title, format!("{} (v2)", WORKING_SEEDS[0].title));
        assert_eq!(list[WORKING_SEEDS.len() * 2].title, format!("{} (v3)", WORKING_SEEDS[0].title));
    }

    #[test]
    fn test_fill_skips_existing_titles() {
        let stats = AggregateStats {
            page_count: 1,
            ..Default::default()
        };
        let mut list = vec![Finding::new("  crawl COVERAGE snapshot ", "Existing.")];
        fit_to_target(&mut list, 3, WORKING_SEEDS, &stats, "example.com");

        assert_eq!(list.len(), 3);
        assert_eq!(list[1].title, WORKING_SEEDS[1].title);
        assert_eq!(list[2].title, WORKING_SEEDS[2].title);
    }

    #[test]
    fn test_truncate_keeps_catalogue_order() {
        let stats = AggregateStats::default();
        let mut list: Vec<Finding> = (0..6).map(|i| Finding::new(format!("F{}", i), "x")).collect();
        fit_to_target(&mut list, 4, NEEDS_SEEDS, &stats, "example.com");
        let titles: Vec<&str> = list.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["F0", "F1", "F2", "F3"]);
    }

    #[test]
    fn test_each_check_lands_in_one_list() {
        let stats = AggregateStats {
            page_count: 4,
            https_page_count: 4,
            https_fraction: 1.0,
            avg_word_count: 500.0,
            ..Default::default()
        };
        let (working, needs_attention) = candidates(&stats, "example.com", ReportMode::Long);
        assert_eq!(working.len() + needs_attention.len(), CHECKS.len());

        let (working, needs_attention) = candidates(&stats, "example.com", ReportMode::Short);
        let short_checks = CHECKS.iter().filter(|c| !c.long_only).count();
        assert_eq!(working.len() + needs_attention.len(), short_checks);
    }
}
