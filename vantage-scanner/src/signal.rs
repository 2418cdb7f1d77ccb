use serde::{Deserialize, Serialize};
use url::Url;

/// Deepest path depth recorded for a page.
pub const MAX_PAGE_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSignals {
    pub phone: bool,
    pub email: bool,
    pub address: bool,
}

impl ContactSignals {
    pub fn any(&self) -> bool {
        self.phone || self.email || self.address
    }
}

/// Structural signals extracted from one successfully fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSignal {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub word_count: usize,
    pub image_count: usize,
    pub image_alt_count: usize,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub has_schema: bool,
    pub has_nav: bool,
    pub has_footer: bool,
    pub has_breadcrumbs: bool,
    pub form_count: usize,
    pub button_count: usize,
    pub social_link_count: usize,
    pub contact_signals: ContactSignals,
    pub is_secure: bool,
    pub depth: usize,
}

impl PageSignal {
    pub fn new(url: String) -> Self {
        let is_secure = url.starts_with("https://");
        let depth = path_depth(&url);
        Self {
            url,
            is_secure,
            depth,
            ..Default::default()
        }
    }

    /// Marks the page as the crawl seed, which always sits at depth 0.
    pub fn as_seed(mut self) -> Self {
        self.depth = 0;
        self
    }
}

/// Number of non-empty path segments, capped at [`MAX_PAGE_DEPTH`].
pub fn path_depth(url: &str) -> usize {
    Url::parse(url)
        .ok()
        .map(|u| u.path().split('/').filter(|s| !s.is_empty()).count())
        .unwrap_or(0)
        .min(MAX_PAGE_DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_depth() {
        assert_eq!(path_depth("https://example.com"), 0);
        assert_eq!(path_depth("https://example.com/"), 0);
        assert_eq!(path_depth("https://example.com/about"), 1);
        assert_eq!(path_depth("https://example.com/blog/2024/"), 2);
        assert_eq!(path_depth("https://example.com/a/b/c/d/e"), 3);
        assert_eq!(path_depth("not a url"), 0);
    }

    #[test]
    fn test_new_sets_scheme_and_depth() {
        let page = PageSignal::new("https://example.com/docs/intro".to_string());
        assert!(page.is_secure);
        assert_eq!(page.depth, 2);

        let page = PageSignal::new("http://example.com/docs/intro".to_string()).as_seed();
        assert!(!page.is_secure);
        assert_eq!(page.depth, 0);
    }
}
