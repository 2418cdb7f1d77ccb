use crate::error::{Result, ScanError};
use crate::extract::extract;
use crate::fetcher::PageFetcher;
use crate::host::{normalize_host, same_host};
use crate::signal::{MAX_PAGE_DEPTH, PageSignal};
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};
use url::Url;

/// Called after each page attempt with the number of pages fetched so far
/// and the URL just attempted.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

const SKIPPED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png", ".gif", ".zip", ".doc", ".docx"];

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector must parse"));

/// Breadth-first, same-host crawler.
///
/// One fetch is outstanding at a time. Link discovery follows document
/// order so the pages kept under a page cap are reproducible.
pub struct Crawler {
    fetcher: PageFetcher,
    max_pages: usize,
    max_depth: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(PageFetcher::new()?))
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_fetcher(PageFetcher::with_timeout(timeout_secs)?))
    }

    pub fn with_fetcher(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            max_pages: 10,
            max_depth: MAX_PAGE_DEPTH,
            progress_callback: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.min(MAX_PAGE_DEPTH);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub async fn crawl(&self, start_url: &str) -> Result<Vec<PageSignal>> {
        let seed = normalize_url(start_url)
            .ok_or_else(|| ScanError::InvalidUrl(start_url.to_string()))?;
        let host = seed
            .host_str()
            .map(normalize_host)
            .ok_or_else(|| ScanError::InvalidUrl(format!("{} has no host", start_url)))?;
        let seed = seed.to_string();

        info!(
            "Starting crawl of {} (max {} pages, depth {})",
            seed, self.max_pages, self.max_depth
        );

        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        let mut results: Vec<PageSignal> = Vec::new();

        seen.insert(crawl_key(&seed));
        queue.push_back(seed.clone());

        while results.len() < self.max_pages {
            let Some(url) = queue.pop_front() else {
                break;
            };

            let body = match self.fetcher.fetch(&url).await {
                Ok(body) => body,
                Err(e) if e.is_per_page() => {
                    warn!("Skipping {}: {}", url, e);
                    self.report_progress(results.len(), &url);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut signal = extract(&body, &url, &host);
            if url == seed {
                signal = signal.as_seed();
            }
            let depth = signal.depth;
            results.push(signal);
            self.report_progress(results.len(), &url);

            if depth < self.max_depth && results.len() < self.max_pages {
                let links = discover_links(&body, &url, &seed, &host);
                debug!("{} same-host links on {}", links.len(), url);
                for link in links {
                    if seen.insert(crawl_key(&link)) {
                        queue.push_back(link);
                    }
                }
            }
        }

        info!("Crawl complete. Fetched {} pages from {}", results.len(), host);

        if results.is_empty() {
            return Err(ScanError::NoPagesCrawled(seed));
        }
        Ok(results)
    }

    fn report_progress(&self, fetched: usize, url: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(fetched, url.to_string());
        }
    }
}

/// Parses a URL and strips its fragment and query.
fn normalize_url(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    url.set_query(None);
    Some(url)
}

/// Identity of a crawl target: normalized host, port and path.
///
/// `www.` and bare-host spellings of the same page share a key, as do its
/// http and https variants on default ports.
pub fn crawl_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().map(normalize_host).unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{}:{}{}", host, port, parsed.path()),
                None => format!("{}{}", host, parsed.path()),
            }
        }
        Err(_) => url.to_string(),
    }
}

/// Same-host crawl targets on a page, in document order, without duplicates.
pub fn discover_links(html: &str, page_url: &str, start_url: &str, host: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut found = HashSet::new();

    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(target) = resolve_link(href, page_url, start_url, host) else {
            continue;
        };
        if found.insert(crawl_key(&target)) {
            links.push(target);
        }
    }

    links
}

/// Resolves an anchor `href` to an absolute crawl target.
///
/// Root-relative hrefs resolve against the start URL, document-relative
/// hrefs against the current page. Off-host targets and binary downloads
/// are rejected.
pub fn resolve_link(href: &str, page_url: &str, start_url: &str, host: &str) -> Option<String> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let base = if href.starts_with('/') && !href.starts_with("//") {
        start_url
    } else {
        page_url
    };
    let resolved = Url::parse(base).ok()?.join(href).ok()?;
    let url = normalize_url(resolved.as_str())?;

    if !url.host_str().is_some_and(|h| same_host(h, host)) {
        debug!("  -> {} is off-host, skipping", url);
        return None;
    }

    let path = url.path().to_ascii_lowercase();
    if SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        debug!("  -> {} is a binary download, skipping", url);
        return None;
    }

    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn html_response(body: String) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html; charset=utf-8")
            .set_body_bytes(body.into_bytes())
    }

    async fn mount_page(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_response(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_resolve_root_relative_against_start() {
        let resolved = resolve_link(
            "/pricing?ref=nav#plans",
            "https://example.com/blog/post",
            "https://example.com/",
            "example.com",
        );
        assert_eq!(resolved, Some("https://example.com/pricing".to_string()));
    }

    #[test]
    fn test_resolve_document_relative_against_page() {
        let resolved = resolve_link(
            "team.html",
            "https://example.com/about/",
            "https://example.com/",
            "example.com",
        );
        assert_eq!(resolved, Some("https://example.com/about/team.html".to_string()));
    }

    #[test]
    fn test_resolve_rejects_other_hosts_and_schemes() {
        let page = "https://example.com/";
        assert_eq!(resolve_link("https://other.org/x", page, page, "example.com"), None);
        assert_eq!(resolve_link("//cdn.example.net/x", page, page, "example.com"), None);
        assert_eq!(resolve_link("mailto:a@example.com", page, page, "example.com"), None);
        assert_eq!(resolve_link("javascript:void(0)", page, page, "example.com"), None);
        assert_eq!(resolve_link("#section", page, page, "example.com"), None);
        assert_eq!(resolve_link("", page, page, "example.com"), None);
    }

    #[test]
    fn test_resolve_accepts_www_variant() {
        let resolved = resolve_link(
            "https://www.example.com/contact",
            "https://example.com/",
            "https://example.com/",
            "example.com",
        );
        assert_eq!(resolved, Some("https://www.example.com/contact".to_string()));
    }

    #[test]
    fn test_resolve_rejects_binary_extensions() {
        let page = "https://example.com/";
        for href in ["/brochure.PDF", "/img/logo.png", "/files/archive.zip", "/cv.docx"] {
            assert_eq!(resolve_link(href, page, page, "example.com"), None, "{}", href);
        }
        assert!(resolve_link("/docs.html", page, page, "example.com").is_some());
    }

    #[test]
    fn test_crawl_key_merges_host_spellings() {
        assert_eq!(crawl_key("https://www.example.com/about"), "example.com/about");
        assert_eq!(crawl_key("https://example.com/about"), "example.com/about");
        assert_eq!(crawl_key("http://Example.com/about"), "example.com/about");
        assert_eq!(crawl_key("http://127.0.0.1:8080/a"), "127.0.0.1:8080/a");
        assert_ne!(crawl_key("https://shop.example.com/about"), "example.com/about");
    }

    #[test]
    fn test_discover_links_dedupes_www_variant() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="https://www.example.com/about">About again</a>
            <a href="https://www.example.com/team">Team</a>
        </body></html>"#;
        let links = discover_links(html, "https://example.com/", "https://example.com/", "example.com");
        assert_eq!(
            links,
            vec!["https://example.com/about", "https://www.example.com/team"]
        );
    }

    #[test]
    fn test_discover_links_preserves_document_order() {
        let html = r#"<html><body>
            <a href="/zeta">Z</a>
            <a href="/alpha">A</a>
            <a href="/zeta#again">Z again</a>
            <a href="https://elsewhere.net/">Off</a>
            <a href="/middle">M</a>
        </body></html>"#;
        let links = discover_links(html, "https://example.com/", "https://example.com/", "example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/zeta",
                "https://example.com/alpha",
                "https://example.com/middle",
            ]
        );
    }

    #[tokio::test]
    async fn test_crawl_follows_same_host_links() {
        let mock_server = MockServer::start().await;

        let root_html = format!(
            r#"<html><head><title>Home</title></head><body>
                <a href="{}/page1">Page 1</a>
                <a href="/page2">Page 2</a>
                <a href="https://elsewhere.example.org/">Elsewhere</a>
            </body></html>"#,
            mock_server.uri()
        );
        mount_page(&mock_server, "/", root_html).await;
        mount_page(&mock_server, "/page1", "<html><body>P1</body></html>".to_string()).await;
        mount_page(&mock_server, "/page2", "<html><body>P2</body></html>".to_string()).await;

        let crawler = Crawler::with_timeout(5).unwrap().with_max_pages(10);
        let results = crawler.crawl(&mock_server.uri()).await.unwrap();

        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(results.len(), 3, "crawled: {:?}", urls);
        assert_eq!(results[0].title, "Home");
        assert_eq!(results[0].depth, 0);
        assert!(urls[1].ends_with("/page1"));
        assert!(urls[2].ends_with("/page2"));
    }

    #[tokio::test]
    async fn test_crawl_stops_at_max_pages() {
        let mock_server = MockServer::start().await;

        let mut root_html = String::from("<html><body>");
        for i in 1..=10 {
            root_html.push_str(&format!(r#"<a href="/page{}">Page {}</a>"#, i, i));
        }
        root_html.push_str("</body></html>");
        mount_page(&mock_server, "/", root_html).await;
        for i in 1..=10 {
            mount_page(
                &mock_server,
                &format!("/page{}", i),
                "<html><body>Page</body></html>".to_string(),
            )
            .await;
        }

        let crawler = Crawler::with_timeout(5).unwrap().with_max_pages(4);
        let results = crawler.crawl(&mock_server.uri()).await.unwrap();

        assert_eq!(results.len(), 4);
        // Document order decides which pages survive the cap
        assert!(results[1].url.ends_with("/page1"));
        assert!(results[2].url.ends_with("/page2"));
        assert!(results[3].url.ends_with("/page3"));
    }

    #[tokio::test]
    async fn test_crawl_skips_failed_pages_without_retry() {
        let mock_server = MockServer::start().await;

        mount_page(
            &mock_server,
            "/",
            r#"<html><body><a href="/missing">Gone</a><a href="/ok">OK</a></body></html>"#.to_string(),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_page(&mock_server, "/ok", "<html><body>fine</body></html>".to_string()).await;

        let crawler = Crawler::with_timeout(5).unwrap();
        let results = crawler.crawl(&mock_server.uri()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.url.ends_with("/missing")));
    }

    #[tokio::test]
    async fn test_crawl_respects_depth_gate() {
        let mock_server = MockServer::start().await;

        mount_page(
            &mock_server,
            "/",
            r#"<html><body><a href="/a/b/c/deep">Deep</a></body></html>"#.to_string(),
        )
        .await;
        mount_page(
            &mock_server,
            "/a/b/c/deep",
            r#"<html><body><a href="/never">Never</a></body></html>"#.to_string(),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/never"))
            .respond_with(html_response("<html></html>".to_string()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let crawler = Crawler::with_timeout(5).unwrap();
        let results = crawler.crawl(&mock_server.uri()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].depth, 3);
        assert!(results.iter().all(|r| r.depth <= MAX_PAGE_DEPTH));
    }

    #[tokio::test]
    async fn test_crawl_with_no_reachable_pages_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let crawler = Crawler::with_timeout(5).unwrap();
        let result = crawler.crawl(&mock_server.uri()).await;

        assert!(matches!(result, Err(ScanError::NoPagesCrawled(_))));
    }

    #[tokio::test]
    async fn test_crawl_skips_non_html_responses() {
        let mock_server = MockServer::start().await;

        mount_page(
            &mock_server,
            "/",
            r#"<html><body><a href="/data.json">Data</a></body></html>"#.to_string(),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_bytes(b"{}".to_vec()),
            )
            .mount(&mock_server)
            .await;

        let crawler = Crawler::with_timeout(5).unwrap();
        let results = crawler.crawl(&mock_server.uri()).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_crawl_skips_oversized_pages() {
        let mock_server = MockServer::start().await;

        mount_page(
            &mock_server,
            "/",
            r#"<html><body><a href="/huge">Huge</a><a href="/ok">OK</a></body></html>"#.to_string(),
        )
        .await;
        mount_page(
            &mock_server,
            "/huge",
            format!("<html><body>{}</body></html>", "word ".repeat(1000)),
        )
        .await;
        mount_page(&mock_server, "/ok", "<html><body>fine</body></html>".to_string()).await;

        let fetcher = PageFetcher::with_timeout(5).unwrap().with_max_body_bytes(512);
        let crawler = Crawler::with_fetcher(fetcher);
        let results = crawler.crawl(&mock_server.uri()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[1].url.ends_with("/ok"));
    }

    #[tokio::test]
    async fn test_invalid_start_url() {
        let crawler = Crawler::with_timeout(5).unwrap();
        let result = crawler.crawl("not a url").await;
        assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_progress_callback_reports_each_attempt() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/",
            r#"<html><body><a href="/one">1</a></body></html>"#.to_string(),
        )
        .await;
        mount_page(&mock_server, "/one", "<html><body>1</body></html>".to_string()).await;

        let seen: Arc<Mutex<Vec<(usize, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let crawler = Crawler::with_timeout(5)
            .unwrap()
            .with_progress_callback(Arc::new(move |fetched, url| {
                seen_clone.lock().unwrap().push((fetched, url));
            }));

        crawler.crawl(&mock_server.uri()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[1].0, 2);
        assert!(seen[1].1.ends_with("/one"));
    }
}
