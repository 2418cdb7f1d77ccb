use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Not an HTML page: {url} ({content_type})")]
    NotHtml { url: String, content_type: String },

    #[error("Response body of {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },

    #[error("No pages crawled from {0}")]
    NoPagesCrawled(String),
}

impl ScanError {
    /// Whether the error only concerns a single page and the crawl can carry on.
    pub fn is_per_page(&self) -> bool {
        matches!(
            self,
            ScanError::HttpError(_)
                | ScanError::HttpStatus { .. }
                | ScanError::NotHtml { .. }
                | ScanError::BodyTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
