use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};
use tracing::Level;
use vantage::handlers::*;
use vantage_core::ReportMode;

// ============================================================================
// URL Parsing Tests
// ============================================================================

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_keeps_http() {
    let result = parse_url_line("http://example.com/path");
    assert_eq!(result, Some("http://example.com/path".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_host_with_port() {
    let result = parse_url_line("localhost:8080");
    assert_eq!(result, Some("https://localhost:8080".to_string()));
}

#[test]
fn test_parse_url_line_trims_whitespace() {
    let result = parse_url_line("  example.com  ");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    assert_eq!(parse_url_line("not a valid url!!!"), None);
    assert_eq!(parse_url_line(""), None);
}

// ============================================================================
// Mode and Logging Tests
// ============================================================================

#[test]
fn test_resolve_mode() {
    assert_eq!(resolve_mode("analyze"), Some(ReportMode::Short));
    assert_eq!(resolve_mode("report"), Some(ReportMode::Long));
    assert_eq!(resolve_mode("full-report"), Some(ReportMode::Long));
    assert_eq!(resolve_mode("crawl"), None);
}

#[test]
fn test_log_level() {
    assert_eq!(log_level(false, false), Level::INFO);
    assert_eq!(log_level(false, true), Level::DEBUG);
    assert_eq!(log_level(true, false), Level::WARN);
}

// ============================================================================
// Override Loading Tests
// ============================================================================

#[test]
fn test_load_overrides_default_is_builtin() {
    let overrides = load_overrides(None, false).unwrap();
    assert!(overrides.lookup("gov.uk").is_some());
}

#[test]
fn test_load_overrides_disabled() {
    let overrides = load_overrides(None, true).unwrap();
    assert!(overrides.is_empty());
}

#[test]
fn test_load_overrides_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(
        temp_file,
        r#"{{ "shop.example.com": {{ "score": 70, "pillars": {{ "access": 18, "trust": 19, "clarity": 20, "alignment": 17 }} }} }}"#
    )?;

    let path = temp_file.path().to_path_buf();
    let overrides = load_overrides(Some(&path), false)?;
    assert_eq!(overrides.len(), 1);
    assert!(overrides.lookup("gov.uk").is_none());
    Ok(())
}

#[test]
fn test_load_overrides_missing_file() {
    let path = PathBuf::from("/nonexistent/overrides.json");
    let err = load_overrides(Some(&path), false).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/overrides.json"));
}

// ============================================================================
// Output Tests
// ============================================================================

#[test]
fn test_write_output_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("out.json");

    write_output("{\"ok\":true}", Some(&path))?;
    assert_eq!(std::fs::read_to_string(&path)?, "{\"ok\":true}");
    Ok(())
}

#[test]
fn test_write_output_to_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope").join("out.txt");
    assert!(write_output("content", Some(&path)).is_err());
}
