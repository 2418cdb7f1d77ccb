use url::Url;

/// Lower-cases a host and strips a leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Host of `url` in normalized form, if it parses.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(normalize_host))
}

pub fn same_host(a: &str, b: &str) -> bool {
    normalize_host(a) == normalize_host(b)
}
