// Page signal extraction. Pure function of HTML + URL + host, no I/O.

use crate::host::{normalize_host, same_host};
use crate::signal::{ContactSignals, PageSignal};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_NAMED: LazyLock<Selector> = LazyLock::new(|| selector("meta[name]"));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static H2: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static H3: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static SCHEMA: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"script[type="application/ld+json"], [itemscope], [itemtype]"#)
});
static NAV: LazyLock<Selector> = LazyLock::new(|| selector(r#"nav, [role="navigation"]"#));
static FOOTER: LazyLock<Selector> = LazyLock::new(|| selector(r#"footer, [role="contentinfo"]"#));
static LABELLED: LazyLock<Selector> =
    LazyLock::new(|| selector("[class], [aria-label], [itemtype], [itemprop]"));
static FORM: LazyLock<Selector> = LazyLock::new(|| selector("form"));
static BUTTON: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"button, input[type="submit"], input[type="button"], [role="button"]"#)
});
static ADDRESS: LazyLock<Selector> = LazyLock::new(|| selector("address"));

const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

const SOCIAL_HOSTS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "threads.net",
    "mastodon.social",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    Internal,
    External,
    Ignored,
}

/// Builds a [`PageSignal`] from a fetched page.
///
/// Missing elements are not errors: an absent title is an empty string, an
/// absent image set is a zero count. `depth` is derived from the URL path;
/// the crawler resets it to 0 for the seed page.
pub fn extract(html: &str, page_url: &str, host: &str) -> PageSignal {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let mut signal = PageSignal::new(page_url.to_string());

    signal.title = document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    signal.meta_description = document
        .select(&META_NAMED)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    signal.h1_count = document.select(&H1).count();
    signal.h2_count = document.select(&H2).count();
    signal.h3_count = document.select(&H3).count();
    signal.word_count = visible_word_count(&document);

    for img in document.select(&IMG) {
        signal.image_count += 1;
        if img.value().attr("alt").is_some_and(|alt| !alt.trim().is_empty()) {
            signal.image_alt_count += 1;
        }
    }

    let mut contact = ContactSignals::default();
    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        let lower = href.to_ascii_lowercase();
        if lower.starts_with("tel:") {
            contact.phone = true;
        } else if lower.starts_with("mailto:") {
            contact.email = true;
        }

        match classify_link(href, base.as_ref(), host) {
            LinkKind::Internal => signal.internal_link_count += 1,
            LinkKind::External => {
                signal.external_link_count += 1;
                if is_social_link(href, base.as_ref()) {
                    signal.social_link_count += 1;
                }
            }
            LinkKind::Ignored => {}
        }
    }

    signal.has_schema = document.select(&SCHEMA).next().is_some();
    signal.has_nav = document.select(&NAV).next().is_some();
    signal.has_footer = document.select(&FOOTER).next().is_some();
    signal.form_count = document.select(&FORM).count();
    signal.button_count = document.select(&BUTTON).count();

    contact.address = document.select(&ADDRESS).next().is_some();
    for el in document.select(&LABELLED) {
        if !signal.has_breadcrumbs && is_breadcrumb(&el) {
            signal.has_breadcrumbs = true;
        }
        if !contact.address && is_address(&el) {
            contact.address = true;
        }
        if signal.has_breadcrumbs && contact.address {
            break;
        }
    }
    signal.contact_signals = contact;

    signal
}

fn visible_word_count(document: &Html) -> usize {
    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TEXT_TAGS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text.split_whitespace().count()
}

fn classify_link(href: &str, base: Option<&Url>, host: &str) -> LinkKind {
    let lower = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return LinkKind::Ignored;
    }

    let resolved = match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    };

    match resolved {
        Some(url) if url.scheme() == "http" || url.scheme() == "https" => match url.host_str() {
            Some(link_host) if same_host(link_host, host) => LinkKind::Internal,
            Some(_) => LinkKind::External,
            None => LinkKind::Ignored,
        },
        _ => LinkKind::Ignored,
    }
}

fn is_social_link(href: &str, base: Option<&Url>) -> bool {
    let resolved = match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    };
    let Some(link_host) = resolved.as_ref().and_then(|u| u.host_str()).map(normalize_host) else {
        return false;
    };
    SOCIAL_HOSTS
        .iter()
        .any(|social| link_host == *social || link_host.ends_with(&format!(".{}", social)))
}

fn attr_contains(el: &ElementRef, attr: &str, needle: &str) -> bool {
    el.value()
        .attr(attr)
        .is_some_and(|value| value.to_ascii_lowercase().contains(needle))
}

fn is_breadcrumb(el: &ElementRef) -> bool {
    attr_contains(el, "class", "breadcrumb")
        || attr_contains(el, "aria-label", "breadcrumb")
        || attr_contains(el, "itemtype", "breadcrumblist")
}

fn is_address(el: &ElementRef) -> bool {
    attr_contains(el, "class", "address")
        || el
            .value()
            .attr("itemprop")
            .is_some_and(|prop| prop.eq_ignore_ascii_case("address"))
        || attr_contains(el, "itemtype", "postaladdress")
}
