use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("vantage")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("vantage")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner, progress and informational logs")
                .required(false)
                .global(true)
                .conflicts_with("verbose"),
        )
        .arg(
            arg!(-v --"verbose" "Log per-page and per-link decisions")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(audit_args(
            command!("analyze")
                .about("Quick analysis: crawl a handful of pages and summarize what works and what needs attention"),
        ))
        .subcommand(audit_args(
            command!("report")
                .about("Full report: crawl deeper and produce longer, score-banded findings"),
        ))
}

fn audit_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(-u --"url" <URL>)
            .required(true)
            .help("The site to audit. https:// is assumed when no scheme is given"),
    )
    .arg(
        arg!(--"max-pages" <NUM>)
            .required(false)
            .help("Maximum number of pages to fetch (default: 10 for analyze, 50 for report)")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        arg!(--"max-depth" <NUM>)
            .required(false)
            .help("Maximum path depth to follow links from (capped at 3)")
            .value_parser(clap::value_parser!(usize))
            .default_value("3"),
    )
    .arg(
        arg!(--"timeout" <SECONDS>)
            .required(false)
            .help("Per-page fetch timeout in seconds (default: 5 for analyze, 10 for report)")
            .value_parser(clap::value_parser!(u64)),
    )
    .arg(
        arg!(--"overrides" <PATH>)
            .required(false)
            .help("JSON file of fixed host scores, replacing the built-in table")
            .value_parser(clap::value_parser!(std::path::PathBuf))
            .conflicts_with("no-overrides"),
    )
    .arg(
        arg!(--"no-overrides")
            .required(false)
            .help("Score every host from its crawl data")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        arg!(-f --"format" <FORMAT>)
            .required(false)
            .help("Report format: text, json, html, markdown")
            .value_parser(["text", "json", "html", "markdown", "md"])
            .default_value("text"),
    )
    .arg(
        arg!(-o --"output" <PATH>)
            .required(false)
            .help("Save report to file (default: display to screen)")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    )
}
