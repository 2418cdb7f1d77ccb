pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod host;
pub mod signal;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use extract::extract;
pub use fetcher::PageFetcher;
pub use host::normalize_host;
pub use signal::{ContactSignals, MAX_PAGE_DEPTH, PageSignal};
