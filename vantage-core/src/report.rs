// Report assembly and rendering

use crate::config::{HostOverrides, ReportMode};
use crate::findings::{self, Finding, FindingSet};
use crate::insights;
use crate::score::{self, Pillars};
use crate::stats::AggregateStats;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use vantage_scanner::PageSignal;

/// Fallback score when the crawl returned no pages.
pub const NO_PAGES_SCORE: u32 = score::EMPTY_CRAWL_SCORE;
/// Fallback score when the crawl could not run at all.
pub const CRAWL_ABORTED_SCORE: u32 = 35;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────────────────────\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Html,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "html" => Some(ReportFormat::Html),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    NoPagesCrawled,
    CrawlAborted,
}

impl DegradedReason {
    pub fn score(&self) -> u32 {
        match self {
            DegradedReason::NoPagesCrawled => NO_PAGES_SCORE,
            DegradedReason::CrawlAborted => CRAWL_ABORTED_SCORE,
        }
    }
}

/// The externally visible result of one audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub host: String,
    pub mode: ReportMode,
    pub score: u32,
    pub pillars: Pillars,
    pub working_findings: Vec<Finding>,
    pub needs_attention_findings: Vec<Finding>,
    pub insights: Vec<Finding>,
    pub pages_crawled: usize,
    pub crawled_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<DegradedReason>,
}

impl AuditReport {
    /// Combines scorer, synthesizer and insight output for one crawl.
    pub fn assemble(
        pages: &[PageSignal],
        host: &str,
        mode: ReportMode,
        overrides: &HostOverrides,
    ) -> Self {
        if pages.is_empty() {
            return Self::degraded(host, mode, DegradedReason::NoPagesCrawled);
        }

        let stats = AggregateStats::from_pages(pages);
        let quality = score::evaluate_stats(&stats, host, overrides);
        let FindingSet {
            working,
            needs_attention,
        } = findings::synthesize_from_stats(&stats, host, mode, quality.score);

        Self {
            host: host.to_string(),
            mode,
            score: quality.score,
            pillars: quality.pillars,
            working_findings: working,
            needs_attention_findings: needs_attention,
            insights: insights::format_from_stats(&stats, host, mode),
            pages_crawled: pages.len(),
            crawled_urls: pages.iter().map(|p| p.url.clone()).collect(),
            degraded: None,
        }
    }

    /// The fixed fallback shape for a crawl that produced nothing.
    pub fn degraded(host: &str, mode: ReportMode, reason: DegradedReason) -> Self {
        let set = match reason {
            DegradedReason::NoPagesCrawled => FindingSet::crawl_failed(host, mode),
            DegradedReason::CrawlAborted => FindingSet::crawl_aborted(host, mode),
        };

        Self {
            host: host.to_string(),
            mode,
            score: reason.score(),
            pillars: Pillars::floor(),
            working_findings: set.working,
            needs_attention_findings: set.needs_attention,
            insights: insights::unable_insights(),
            pages_crawled: 0,
            crawled_urls: Vec::new(),
            degraded: Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

pub fn render(report: &AuditReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Html => Ok(generate_html_report(report)),
        ReportFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

pub fn generate_text_report(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str(RULE);
    out.push_str("                          VANTAGE SITE AUDIT REPORT\n");
    out.push_str(RULE);
    out.push('\n');

    out.push_str(&format!("Host:          {}\n", report.host));
    out.push_str(&format!("Mode:          {}\n", report.mode.as_str()));
    out.push_str(&format!("Pages Crawled: {}\n", report.pages_crawled));
    out.push_str(&format!("Score:         {}/100\n", report.score));
    out.push('\n');

    section(&mut out, "PILLARS");
    for (name, value) in report.pillars.named() {
        out.push_str(&format!("  {:<10} {:>2}/25\n", capitalize(name), value));
    }
    out.push('\n');

    text_findings(&mut out, "WHAT'S WORKING", &report.working_findings);
    text_findings(&mut out, "NEEDS ATTENTION", &report.needs_attention_findings);
    text_findings(&mut out, "AI ENGINE INSIGHTS", &report.insights);

    if !report.crawled_urls.is_empty() {
        section(&mut out, "PAGES ANALYZED");
        for (i, url) in report.crawled_urls.iter().enumerate() {
            let prefix = if i == report.crawled_urls.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            out.push_str(&format!("{}{}\n", prefix, url));
        }
        out.push('\n');
    }

    out.push_str(RULE);
    out.push_str("                                End of Report\n");
    out.push_str(RULE);
    out.push_str("\nGenerated by Vantage - site quality and AI visibility audit\n\n");

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(RULE);
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
}

fn text_findings(out: &mut String, title: &str, findings: &[Finding]) {
    section(out, title);
    if findings.is_empty() {
        out.push_str("  (none)\n\n");
        return;
    }
    for (idx, finding) in findings.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", idx + 1, finding.title));
        for paragraph in crate::polish::split_paragraphs(&finding.description) {
            out.push_str(&wrap_text(paragraph, 80, "  "));
            out.push('\n');
        }
        out.push_str(THIN_RULE);
        out.push('\n');
    }
}

pub fn generate_json_report(report: &AuditReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Vantage",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "audit": report
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_html_report(report: &AuditReport) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>Vantage audit: {}</title>\n</head>\n<body>\n",
        html_escape(&report.host)
    ));
    out.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.host)));
    out.push_str(&format!(
        "<p class=\"score\">Score: <strong>{}</strong>/100</p>\n",
        report.score
    ));

    out.push_str("<ul class=\"pillars\">\n");
    for (name, value) in report.pillars.named() {
        out.push_str(&format!("<li>{}: {}/25</li>\n", capitalize(name), value));
    }
    out.push_str("</ul>\n");

    html_findings(&mut out, "What's working", "working", &report.working_findings);
    html_findings(&mut out, "Needs attention", "needs-attention", &report.needs_attention_findings);
    html_findings(&mut out, "AI engine insights", "insights", &report.insights);

    out.push_str("</body>\n</html>\n");
    out
}

fn html_findings(out: &mut String, heading: &str, class: &str, findings: &[Finding]) {
    out.push_str(&format!("<h2>{}</h2>\n<ul class=\"{}\">\n", heading, class));
    for finding in findings {
        out.push_str(&format!("<li><strong>{}</strong>", html_escape(&finding.title)));
        for paragraph in crate::polish::split_paragraphs(&finding.description) {
            out.push_str(&format!("<p>{}</p>", html_escape(paragraph)));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

pub fn generate_markdown_report(report: &AuditReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Vantage audit: {}\n\n", report.host));
    out.push_str(&format!(
        "**Score:** {}/100 ({} mode, {} pages crawled)\n\n",
        report.score,
        report.mode.as_str(),
        report.pages_crawled
    ));

    out.push_str("| Pillar | Score |\n|---|---|\n");
    for (name, value) in report.pillars.named() {
        out.push_str(&format!("| {} | {}/25 |\n", capitalize(name), value));
    }
    out.push('\n');

    markdown_findings(&mut out, "What's working", &report.working_findings);
    markdown_findings(&mut out, "Needs attention", &report.needs_attention_findings);
    markdown_findings(&mut out, "AI engine insights", &report.insights);

    out
}

fn markdown_findings(out: &mut String, heading: &str, findings: &[Finding]) {
    out.push_str(&format!("## {}\n\n", heading));
    if findings.is_empty() {
        out.push_str("_None._\n\n");
        return;
    }
    for finding in findings {
        let body = crate::polish::split_paragraphs(&finding.description).join(" ");
        out.push_str(&format!("- **{}**: {}\n", finding.title, body));
    }
    out.push('\n');
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 > width - indent.len() && !current_line.is_empty() {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "word ".repeat(40);
        for line in wrap_text(&text, 30, "  ").lines() {
            assert!(line.len() <= 30, "{:?}", line);
            assert!(line.starts_with("  "));
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
