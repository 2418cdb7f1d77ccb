// End-to-end audit tests against a mock site

use vantage_core::audit::{AuditOptions, execute_audit};
use vantage_core::config::HostOverrides;
use vantage_core::report::DegradedReason;
use vantage_core::ReportMode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_bytes(body.as_bytes().to_vec())
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

fn options(url: String, mode: ReportMode) -> AuditOptions {
    let mut options = AuditOptions::new(url, mode);
    options.overrides = HostOverrides::empty();
    options.timeout_secs = 5;
    options
}

// ============================================================================
// Audit Option Tests
// ============================================================================

#[test]
fn test_options_follow_mode_defaults() {
    let short = AuditOptions::new("https://example.com", ReportMode::Short);
    assert_eq!(short.max_pages, 10);
    assert_eq!(short.timeout_secs, 5);
    assert_eq!(short.max_depth, 3);
    assert!(!short.show_progress);
    assert!(!short.overrides.is_empty());

    let long = AuditOptions::new("https://example.com", ReportMode::Long);
    assert_eq!(long.max_pages, 50);
    assert_eq!(long.timeout_secs, 10);
}

// ============================================================================
// Audit Execution Tests
// ============================================================================

#[tokio::test]
async fn test_audit_crawls_and_assembles() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><head><title>Home page of the example test site</title></head>
        <body><nav><a href="/about">About</a><a href="/contact">Contact</a></nav>
        <h1>Welcome</h1><p>Some words here.</p><footer>Footer</footer></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/about",
        r#"<html><head><title>About</title></head><body><h1>About</h1><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/contact",
        r#"<html><head><title>Contact</title></head><body><a href="mailto:hi@example.com">Mail</a></body></html>"#,
    )
    .await;

    let report = execute_audit(options(server.uri(), ReportMode::Short)).await;

    assert!(!report.is_degraded());
    assert_eq!(report.host, "127.0.0.1");
    assert_eq!(report.pages_crawled, 3);
    assert!(report.crawled_urls[1].ends_with("/about"));
    assert!(report.crawled_urls[2].ends_with("/contact"));
    assert_eq!(report.working_findings.len(), 5);
    assert_eq!(report.needs_attention_findings.len(), 10);
    assert_eq!(report.insights.len(), 5);
    assert!((30..=100).contains(&report.score));
}

#[tokio::test]
async fn test_audit_respects_page_cap() {
    let server = MockServer::start().await;
    let mut root = String::from("<html><body>");
    for i in 0..10 {
        root.push_str(&format!(r#"<a href="/p{}">P</a>"#, i));
    }
    root.push_str("</body></html>");
    mount_page(&server, "/", &root).await;
    for i in 0..10 {
        mount_page(&server, &format!("/p{}", i), "<html><body>Leaf</body></html>").await;
    }

    let mut opts = options(server.uri(), ReportMode::Long);
    opts.max_pages = 4;
    let report = execute_audit(opts).await;

    assert_eq!(report.pages_crawled, 4);
}

#[tokio::test]
async fn test_audit_with_no_reachable_pages_degrades() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = execute_audit(options(server.uri(), ReportMode::Long)).await;

    assert_eq!(report.degraded, Some(DegradedReason::NoPagesCrawled));
    assert_eq!(report.score, 30);
    assert!(report.working_findings.is_empty());
    assert_eq!(report.needs_attention_findings.len(), 1);
    assert_eq!(report.insights.len(), 5);
}

#[tokio::test]
async fn test_audit_with_invalid_url_aborts() {
    let report = execute_audit(options("not a url".to_string(), ReportMode::Short)).await;

    assert_eq!(report.degraded, Some(DegradedReason::CrawlAborted));
    assert_eq!(report.score, 35);
    assert_eq!(report.needs_attention_findings.len(), 1);
    assert_eq!(report.needs_attention_findings[0].title, "Crawl could not start");
}

#[tokio::test]
async fn test_audit_applies_overrides_for_host() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<html><body>Tiny</body></html>").await;

    let mut opts = options(server.uri(), ReportMode::Short);
    opts.overrides = HostOverrides::from_json_str(
        r#"{ "127.0.0.1": { "score": 99, "pillars": { "access": 25, "trust": 25, "clarity": 25, "alignment": 24 } } }"#,
    )
    .unwrap();
    let report = execute_audit(opts).await;

    assert_eq!(report.score, 99);
    assert_eq!(report.pillars.alignment, 24);
}
