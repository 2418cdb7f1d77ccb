// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

pub use handlers::{
    build_options, handle_audit, load_overrides, log_level, parse_url_line, resolve_mode,
    write_output,
};

pub use vantage_core::{AuditOptions, AuditReport, ReportFormat, ReportMode, execute_audit};
