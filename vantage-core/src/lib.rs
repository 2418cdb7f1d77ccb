pub mod audit;
pub mod config;
pub mod error;
pub mod findings;
pub mod insights;
pub mod polish;
pub mod report;
pub mod score;
pub mod stats;

use colored::Colorize;

pub use audit::{AuditOptions, execute_audit};
pub use config::{HostOverrides, ReportMode, ScoreOverride};
pub use error::{AuditError, Result};
pub use findings::{Finding, FindingSet};
pub use report::{AuditReport, DegradedReason, ReportFormat};
pub use score::{Pillars, QualityScore};
pub use stats::AggregateStats;

const BANNER: &str = r#"
    ██╗   ██╗ █████╗ ███╗   ██╗████████╗ █████╗  ██████╗ ███████╗
    ██║   ██║██╔══██╗████╗  ██║╚══██╔══╝██╔══██╗██╔════╝ ██╔════╝
    ██║   ██║███████║██╔██╗ ██║   ██║   ███████║██║  ███╗█████╗
    ╚██╗ ██╔╝██╔══██║██║╚██╗██║   ██║   ██╔══██║██║   ██║██╔══╝
     ╚████╔╝ ██║  ██║██║ ╚████║   ██║   ██║  ██║╚██████╔╝███████╗
      ╚═══╝  ╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝ ╚══════╝
"#;

pub fn print_banner() {
    eprintln!("{}", BANNER.cyan());
    eprintln!(
        "    {} v{}\n",
        "site quality and AI visibility audit".dimmed(),
        env!("CARGO_PKG_VERSION")
    );
}
