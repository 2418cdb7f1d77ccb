use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use tracing::Level;
use url::Url;
use vantage_core::report::{self, AuditReport, ReportFormat};
use vantage_core::{AuditOptions, HostOverrides, ReportMode, execute_audit};

/// Parse a single line as a URL, trying to add https:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(line)
        && matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
    {
        return Some(line.to_string());
    }

    let with_scheme = format!("https://{}", line);
    match Url::parse(&with_scheme) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Some(with_scheme),
        _ => None,
    }
}

/// Map a subcommand name to its report mode
pub fn resolve_mode(name: &str) -> Option<ReportMode> {
    match name {
        "analyze" => Some(ReportMode::Short),
        "report" => Some(ReportMode::Long),
        other => ReportMode::from_str(other),
    }
}

pub fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// The override table for a run: disabled, loaded from a file, or builtin.
pub fn load_overrides(path: Option<&PathBuf>, disabled: bool) -> Result<HostOverrides> {
    if disabled {
        return Ok(HostOverrides::empty());
    }
    match path {
        Some(path) => {
            let path_str = path.to_string_lossy();
            HostOverrides::from_json_file(&path_str)
                .with_context(|| format!("Failed to load overrides from {}", path.display()))
        }
        None => Ok(HostOverrides::builtin()),
    }
}

pub fn build_options(args: &ArgMatches, mode: ReportMode, quiet: bool) -> Result<AuditOptions> {
    let raw_url = args
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let url = parse_url_line(raw_url).ok_or_else(|| anyhow!("Invalid URL '{}'", raw_url))?;

    let mut options = AuditOptions::new(url, mode);
    if let Some(max_pages) = args.get_one::<usize>("max-pages") {
        options.max_pages = (*max_pages).max(1);
    }
    if let Some(max_depth) = args.get_one::<usize>("max-depth") {
        options.max_depth = (*max_depth).min(vantage_scanner::MAX_PAGE_DEPTH);
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.overrides = load_overrides(
        args.get_one::<PathBuf>("overrides"),
        args.get_flag("no-overrides"),
    )?;
    options.show_progress = !quiet;

    Ok(options)
}

/// Print the report or save it to `output`.
pub fn write_output(content: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            report::save_report(content, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("{} Report saved to {}", "✓".green(), path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_summary(report: &AuditReport) {
    let score = report.score.to_string();
    let score = match report.score {
        80.. => score.green().bold(),
        60..=79 => score.yellow().bold(),
        _ => score.red().bold(),
    };
    eprintln!(
        "\n{} {} scored {}/100 across {} page(s)\n",
        "✓".green(),
        report.host.bright_cyan(),
        score,
        report.pages_crawled
    );
    if report.is_degraded() {
        eprintln!("{}", "⚠️  The crawl returned no usable pages; showing a fallback report.".yellow());
    }
}

pub async fn handle_audit(args: &ArgMatches, mode: ReportMode, quiet: bool) -> Result<()> {
    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_name)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_name))?;
    let options = build_options(args, mode, quiet)?;

    if !quiet {
        eprintln!(
            "🔎 Auditing {} ({} mode, up to {} pages, depth {})\n",
            options.url,
            mode.as_str(),
            options.max_pages,
            options.max_depth
        );
    }

    let audit = execute_audit(options).await;
    if !quiet {
        print_summary(&audit);
    }

    let content = report::render(&audit, format).context("Failed to render report")?;
    write_output(&content, args.get_one::<PathBuf>("output"))
}
