use thiserror::Error;
use vantage_scanner::ScanError;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Invalid override for {host}: {reason}")]
    InvalidOverride { host: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AuditError>;
