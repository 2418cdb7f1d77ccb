use colored::Colorize;
use commands::command_argument_builder;
use vantage::handlers::{handle_audit, log_level, resolve_mode};
use vantage_core::print_banner;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    init_logging(quiet, verbose);

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let Some((name, sub_matches)) = chosen_command.subcommand() else {
        // No subcommand provided, just show the banner
        return;
    };

    let result = match resolve_mode(name) {
        Some(mode) => handle_audit(sub_matches, mode, quiet).await,
        None => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(quiet, verbose))
        .with_target(false)
        .init();
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
