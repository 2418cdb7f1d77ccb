// Quality score and pillar sub-scores.
//
// The score and the pillars are computed from the same crawl through
// separate formulas; they are not derived from one another.

use crate::config::HostOverrides;
use crate::stats::AggregateStats;
use serde::{Deserialize, Serialize};
use vantage_scanner::PageSignal;

pub const MIN_SCORE: u32 = 30;
pub const MAX_SCORE: u32 = 100;
/// Score reported when there are no pages to score.
pub const EMPTY_CRAWL_SCORE: u32 = 30;

pub const MIN_PILLAR: u32 = 15;
pub const MAX_PILLAR: u32 = 25;
const PILLAR_BASE: i64 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillars {
    pub access: u32,
    pub trust: u32,
    pub clarity: u32,
    pub alignment: u32,
}

impl Pillars {
    pub fn floor() -> Self {
        Self {
            access: MIN_PILLAR,
            trust: MIN_PILLAR,
            clarity: MIN_PILLAR,
            alignment: MIN_PILLAR,
        }
    }

    pub fn named(&self) -> [(&'static str, u32); 4] {
        [
            ("access", self.access),
            ("trust", self.trust),
            ("clarity", self.clarity),
            ("alignment", self.alignment),
        ]
    }
}

/// Overall score plus pillars for one crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    pub score: u32,
    pub pillars: Pillars,
    /// Set when the values came from the host override table.
    pub overridden: bool,
}

/// The aggregate 30-100 score for a crawl.
pub fn score(pages: &[PageSignal]) -> u32 {
    if pages.is_empty() {
        return EMPTY_CRAWL_SCORE;
    }
    score_from_stats(&AggregateStats::from_pages(pages))
}

pub fn score_from_stats(stats: &AggregateStats) -> u32 {
    if stats.is_empty() {
        return EMPTY_CRAWL_SCORE;
    }

    let content = if stats.avg_word_count >= 600.0 {
        12.0
    } else if stats.avg_word_count >= 400.0 {
        8.0
    } else if stats.avg_word_count >= 200.0 {
        4.0
    } else {
        0.0
    };

    let linking = if stats.avg_internal_links >= 6.0 {
        10.0
    } else if stats.avg_internal_links >= 3.0 {
        6.0
    } else {
        0.0
    };

    let raw = 40.0
        + stats.https_fraction * 10.0
        + content
        + stats.single_h1_fraction * 8.0
        + linking
        + stats.schema_fraction * 8.0;

    raw.clamp(MIN_SCORE as f64, MAX_SCORE as f64).round() as u32
}

pub fn pillars(pages: &[PageSignal]) -> Pillars {
    pillars_from_stats(&AggregateStats::from_pages(pages))
}

pub fn pillars_from_stats(stats: &AggregateStats) -> Pillars {
    if stats.is_empty() {
        return Pillars::floor();
    }

    let mut access = PILLAR_BASE + (stats.avg_internal_links / 2.0).floor() as i64;
    if stats.nav_fraction < 0.5 {
        access -= 2;
    }

    let mut trust = PILLAR_BASE;
    if stats.https_fraction >= 1.0 {
        trust += 3;
    } else if stats.https_fraction < 0.5 {
        trust -= 3;
    }
    if stats.has_contact() {
        trust += 2;
    }

    let mut clarity = PILLAR_BASE;
    if stats.single_h1_fraction >= 1.0 {
        clarity += 3;
    }
    if stats.title_fraction >= 1.0 && stats.meta_description_fraction >= 1.0 {
        clarity += 2;
    }
    if stats.thin_fraction > 0.5 {
        clarity -= 3;
    }

    let mut alignment = PILLAR_BASE + (stats.schema_fraction * 4.0).floor() as i64;
    if stats.breadcrumb_fraction >= 0.5 {
        alignment += 2;
    }

    Pillars {
        access: clamp_pillar(access),
        trust: clamp_pillar(trust),
        clarity: clamp_pillar(clarity),
        alignment: clamp_pillar(alignment),
    }
}

fn clamp_pillar(value: i64) -> u32 {
    value.clamp(MIN_PILLAR as i64, MAX_PILLAR as i64) as u32
}

/// Score and pillars for a crawl of `host`, with the override table applied
/// after normal computation.
pub fn evaluate(pages: &[PageSignal], host: &str, overrides: &HostOverrides) -> QualityScore {
    evaluate_stats(&AggregateStats::from_pages(pages), host, overrides)
}

pub fn evaluate_stats(stats: &AggregateStats, host: &str, overrides: &HostOverrides) -> QualityScore {
    let computed = QualityScore {
        score: score_from_stats(stats),
        pillars: pillars_from_stats(stats),
        overridden: false,
    };

    match overrides.lookup(host) {
        Some(entry) => QualityScore {
            score: entry.score,
            pillars: entry.pillars,
            overridden: true,
        },
        None => computed,
    }
}
