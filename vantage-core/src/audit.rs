use crate::config::{HostOverrides, ReportMode};
use crate::report::{AuditReport, DegradedReason};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{info, warn};
use vantage_scanner::host::host_of;
use vantage_scanner::{Crawler, MAX_PAGE_DEPTH, ScanError};

/// Options for configuring an audit
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub url: String,
    pub mode: ReportMode,
    pub max_pages: usize,
    pub max_depth: usize,
    pub timeout_secs: u64,
    pub overrides: HostOverrides,
    pub show_progress: bool,
}

impl AuditOptions {
    /// Options with the mode's page cap and timeout and the builtin overrides.
    pub fn new(url: impl Into<String>, mode: ReportMode) -> Self {
        Self {
            url: url.into(),
            mode,
            max_pages: mode.default_max_pages(),
            max_depth: MAX_PAGE_DEPTH,
            timeout_secs: mode.default_timeout_secs(),
            overrides: HostOverrides::builtin(),
            show_progress: false,
        }
    }
}

/// Crawls the site and assembles a report.
///
/// Never fails: a crawl that fetches nothing, or cannot start, yields a
/// degraded report instead of an error.
pub async fn execute_audit(options: AuditOptions) -> AuditReport {
    let AuditOptions {
        url,
        mode,
        max_pages,
        max_depth,
        timeout_secs,
        overrides,
        show_progress,
    } = options;

    let host = host_of(&url).unwrap_or_else(|| url.clone());

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let crawler = match Crawler::with_timeout(timeout_secs) {
        Ok(crawler) => crawler.with_max_pages(max_pages).with_max_depth(max_depth),
        Err(e) => {
            warn!("Could not set up crawler for {}: {}", url, e);
            finish(&progress_bar, "Crawl aborted".to_string());
            return AuditReport::degraded(&host, mode, DegradedReason::CrawlAborted);
        }
    };

    let crawler = match progress_bar.clone() {
        Some(pb) => crawler.with_progress_callback(Arc::new(move |fetched: usize, _url: String| {
            pb.set_message(format!("Crawling... {} pages fetched", fetched));
            pb.tick();
        })),
        None => crawler,
    };

    let report = match crawler.crawl(&url).await {
        Ok(pages) => {
            finish(&progress_bar, format!("Crawl complete! {} pages fetched", pages.len()));
            AuditReport::assemble(&pages, &host, mode, &overrides)
        }
        Err(ScanError::NoPagesCrawled(seed)) => {
            warn!("No pages could be fetched from {}", seed);
            finish(&progress_bar, "Crawl failed: no pages fetched".to_string());
            AuditReport::degraded(&host, mode, DegradedReason::NoPagesCrawled)
        }
        Err(e) => {
            warn!("Crawl of {} aborted: {}", url, e);
            finish(&progress_bar, "Crawl aborted".to_string());
            AuditReport::degraded(&host, mode, DegradedReason::CrawlAborted)
        }
    };

    info!(
        "Audit of {} finished with score {} ({} pages)",
        report.host, report.score, report.pages_crawled
    );
    report
}

fn finish(progress_bar: &Option<Arc<ProgressBar>>, message: String) {
    if let Some(pb) = progress_bar {
        pb.finish_with_message(message);
    }
}
