// Aggregate statistics over a crawl. Recomputed per report, never stored.

use serde::Serialize;
use std::collections::HashMap;
use vantage_scanner::PageSignal;

/// Pages below this many words count as thin.
pub const THIN_PAGE_WORDS: usize = 300;
/// Pages with fewer internal links than this count as isolated.
pub const ISOLATED_PAGE_LINKS: usize = 2;
pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub page_count: usize,

    pub https_page_count: usize,
    pub https_fraction: f64,

    pub titled_page_count: usize,
    pub title_fraction: f64,
    pub avg_title_length: f64,
    pub short_title_count: usize,
    pub long_title_count: usize,
    pub duplicate_title_count: usize,

    pub meta_description_count: usize,
    pub meta_description_fraction: f64,

    pub single_h1_count: usize,
    pub single_h1_fraction: f64,
    pub missing_h1_count: usize,
    pub multiple_h1_count: usize,
    pub avg_h2_count: f64,
    pub avg_h3_count: f64,

    pub avg_word_count: f64,
    pub word_count_std_dev: f64,
    pub thin_page_count: usize,
    pub thin_fraction: f64,

    pub total_images: usize,
    pub total_images_with_alt: usize,
    pub alt_coverage: f64,

    pub avg_internal_links: f64,
    pub internal_link_std_dev: f64,
    pub isolated_page_count: usize,
    pub avg_external_links: f64,

    pub schema_page_count: usize,
    pub schema_fraction: f64,
    pub breadcrumb_fraction: f64,
    pub nav_fraction: f64,
    pub footer_fraction: f64,

    pub total_forms: usize,
    pub total_buttons: usize,
    pub total_social_links: usize,
    pub has_phone: bool,
    pub has_email: bool,
    pub has_address: bool,

    pub avg_depth: f64,
}

impl AggregateStats {
    pub fn from_pages(pages: &[PageSignal]) -> Self {
        if pages.is_empty() {
            return Self::default();
        }

        let n = pages.len();
        let count = |pred: fn(&PageSignal) -> bool| pages.iter().filter(|p| pred(p)).count();
        let fraction = |c: usize| c as f64 / n as f64;

        let word_counts: Vec<f64> = pages.iter().map(|p| p.word_count as f64).collect();
        let internal_links: Vec<f64> = pages.iter().map(|p| p.internal_link_count as f64).collect();

        let titles: Vec<&str> = pages
            .iter()
            .map(|p| p.title.trim())
            .filter(|t| !t.is_empty())
            .collect();
        let titled_page_count = titles.len();
        let avg_title_length = if titles.is_empty() {
            0.0
        } else {
            titles.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / titles.len() as f64
        };

        let mut title_counts: HashMap<String, usize> = HashMap::new();
        for title in &titles {
            *title_counts.entry(title.to_lowercase()).or_insert(0) += 1;
        }
        let duplicate_title_count = title_counts.values().filter(|&&c| c > 1).sum::<usize>();

        let total_images: usize = pages.iter().map(|p| p.image_count).sum();
        let total_images_with_alt: usize = pages
            .iter()
            .map(|p| p.image_alt_count.min(p.image_count))
            .sum();
        let alt_coverage = if total_images == 0 {
            1.0
        } else {
            total_images_with_alt as f64 / total_images as f64
        };

        let https_page_count = count(|p| p.is_secure);
        let meta_description_count = count(|p| !p.meta_description.trim().is_empty());
        let single_h1_count = count(|p| p.h1_count == 1);
        let thin_page_count = count(|p| p.word_count < THIN_PAGE_WORDS);
        let schema_page_count = count(|p| p.has_schema);

        Self {
            page_count: n,

            https_page_count,
            https_fraction: fraction(https_page_count),

            titled_page_count,
            title_fraction: fraction(titled_page_count),
            avg_title_length,
            short_title_count: titles
                .iter()
                .filter(|t| t.chars().count() < TITLE_MIN_CHARS)
                .count(),
            long_title_count: titles
                .iter()
                .filter(|t| t.chars().count() > TITLE_MAX_CHARS)
                .count(),
            duplicate_title_count,

            meta_description_count,
            meta_description_fraction: fraction(meta_description_count),

            single_h1_count,
            single_h1_fraction: fraction(single_h1_count),
            missing_h1_count: count(|p| p.h1_count == 0),
            multiple_h1_count: count(|p| p.h1_count > 1),
            avg_h2_count: mean(&pages.iter().map(|p| p.h2_count as f64).collect::<Vec<_>>()),
            avg_h3_count: mean(&pages.iter().map(|p| p.h3_count as f64).collect::<Vec<_>>()),

            avg_word_count: mean(&word_counts),
            word_count_std_dev: std_dev(&word_counts),
            thin_page_count,
            thin_fraction: fraction(thin_page_count),

            total_images,
            total_images_with_alt,
            alt_coverage,

            avg_internal_links: mean(&internal_links),
            internal_link_std_dev: std_dev(&internal_links),
            isolated_page_count: count(|p| p.internal_link_count < ISOLATED_PAGE_LINKS),
            avg_external_links: mean(
                &pages
                    .iter()
                    .map(|p| p.external_link_count as f64)
                    .collect::<Vec<_>>(),
            ),

            schema_page_count,
            schema_fraction: fraction(schema_page_count),
            breadcrumb_fraction: fraction(count(|p| p.has_breadcrumbs)),
            nav_fraction: fraction(count(|p| p.has_nav)),
            footer_fraction: fraction(count(|p| p.has_footer)),

            total_forms: pages.iter().map(|p| p.form_count).sum(),
            total_buttons: pages.iter().map(|p| p.button_count).sum(),
            total_social_links: pages.iter().map(|p| p.social_link_count).sum(),
            has_phone: pages.iter().any(|p| p.contact_signals.phone),
            has_email: pages.iter().any(|p| p.contact_signals.email),
            has_address: pages.iter().any(|p| p.contact_signals.address),

            avg_depth: mean(&pages.iter().map(|p| p.depth as f64).collect::<Vec<_>>()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    pub fn has_contact(&self) -> bool {
        self.has_phone || self.has_email || self.has_address
    }

    /// Word count spread relative to the mean. 0 when there is no content.
    pub fn word_count_variation(&self) -> f64 {
        if self.avg_word_count <= 0.0 {
            0.0
        } else {
            self.word_count_std_dev / self.avg_word_count
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Formats a 0-1 fraction as a whole percentage.
pub fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}
