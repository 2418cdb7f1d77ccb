use crate::error::{Result, ScanError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

pub const USER_AGENT: &str = concat!("VantageAudit/", env!("CARGO_PKG_VERSION"), " (site quality crawler)");

/// Largest response body read for a single page.
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Issues one GET per URL with a bounded timeout. No retries.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let timeout_secs = timeout_secs.max(1);
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: MAX_BODY_BYTES,
        })
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Fetches `url` and returns its body. Non-2xx statuses, non-HTML
    /// content types and oversized bodies are reported as errors so the
    /// caller can skip the page.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase());

        if let Some(content_type) = content_type {
            if !content_type.contains("html") {
                return Err(ScanError::NotHtml {
                    url: url.to_string(),
                    content_type,
                });
            }
        }

        let too_large = || ScanError::BodyTooLarge {
            url: url.to_string(),
            limit: self.max_body_bytes,
        };

        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!("Fetched {} ({} bytes in {:?})", url, body.len(), start.elapsed());

        Ok(body)
    }
}
