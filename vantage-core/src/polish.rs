// Description length and tone enforcement for findings.

use crate::config::ReportMode;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const SHORT_SENTENCES: usize = 3;
pub const LONG_MIN_SENTENCES: usize = 6;
pub const LONG_MAX_SENTENCES: usize = 9;
pub const MIN_PARAGRAPH_SENTENCES: usize = 3;
pub const PARAGRAPH_BREAK: &str = "\n\n";

const SHORT_FILLER: &[&str] = &[
    "This reading reflects the pages reached during the crawl.",
    "Patterns like this tend to hold steady between visits.",
    "The signal is strongest on pages closest to the homepage.",
    "Small shifts here tend to show up quickly in later crawls.",
    "Readers and crawlers meet this signal early in a visit.",
    "The pattern is consistent with similar sites of this size.",
];

const LONG_FILLER: &[&str] = &[
    "This reading reflects the pages reached during the crawl.",
    "Patterns like this tend to hold steady between visits.",
    "The signal is strongest on pages closest to the homepage.",
    "Deeper sections of the site may carry a different mix.",
    "Small shifts here tend to show up quickly in later crawls.",
    "Readers and crawlers meet this signal early in a visit.",
    "Answer engines weigh the same markers when they summarize a page.",
    "The pattern is consistent with similar sites of this size.",
    "Changes elsewhere on the site rarely move this signal on their own.",
];

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

static SUBSTITUTIONS: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    [
        (r"(?i)\byou (?:should|must|need to)\b", "you may"),
        (r"(?i)\b(?:should|must|needs? to)\b", "tends to"),
        (r"(?i)\b(?:best practices?|checklists?|steps)\b", "pattern"),
        (r"(?i)\b(?:adding|implementing|fixing|optimizing)\b", "shaping"),
        (r"(?i)\b(?:add|implement|fix|optimize)\b", "shape"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| Substitution {
        pattern: Regex::new(pattern).expect("static pattern must compile"),
        replacement,
    })
    .collect()
});

/// Rewrites instruction-style wording into observations.
pub fn neutralize(text: &str) -> String {
    let mut out = text.to_string();
    for sub in SUBSTITUTIONS.iter() {
        out = sub
            .pattern
            .replace_all(&out, |caps: &Captures| {
                let matched = &caps[0];
                if matched.chars().next().is_some_and(char::is_uppercase) {
                    capitalize(sub.replacement)
                } else {
                    sub.replacement.to_string()
                }
            })
            .into_owned();
    }
    out
}

/// Splits text at sentence-ending punctuation followed by whitespace and
/// an uppercase letter or digit.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && starts_sentence(chars[j].1) {
                push_trimmed(&mut sentences, &text[start..pos + c.len_utf8()]);
                start = chars[j].0;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split(PARAGRAPH_BREAK)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Neutralizes, pads, and trims a description to the mode's budget.
/// `index` picks where the filler pool starts so neighbouring findings vary.
pub fn polish(description: &str, mode: ReportMode, index: usize) -> String {
    match mode {
        ReportMode::Short => polish_short(description, index),
        ReportMode::Long => polish_long(description, index),
    }
}

/// Exactly three sentences.
pub fn polish_short(description: &str, index: usize) -> String {
    let mut sentences = normalized_sentences(description);
    pad(&mut sentences, SHORT_SENTENCES, SHORT_FILLER, index);
    sentences.truncate(SHORT_SENTENCES);
    sentences.join(" ")
}

/// Six to nine sentences in paragraphs of at least three.
pub fn polish_long(description: &str, index: usize) -> String {
    let mut sentences = normalized_sentences(description);
    pad(&mut sentences, LONG_MIN_SENTENCES, LONG_FILLER, index);
    sentences.truncate(LONG_MAX_SENTENCES);

    paragraph_sizes(sentences.len())
        .into_iter()
        .scan(0, |offset, size| {
            let paragraph = sentences[*offset..*offset + size].join(" ");
            *offset += size;
            Some(paragraph)
        })
        .collect::<Vec<_>>()
        .join(PARAGRAPH_BREAK)
}

/// Paragraph sizes for `n` sentences: 1-3 paragraphs, each at least
/// [`MIN_PARAGRAPH_SENTENCES`] long, sizes differing by at most one.
fn paragraph_sizes(n: usize) -> Vec<usize> {
    let count = (n / MIN_PARAGRAPH_SENTENCES).clamp(1, 3);
    let base = n / count;
    let extra = n % count;
    (0..count).map(|i| base + usize::from(i < extra)).collect()
}

fn normalized_sentences(description: &str) -> Vec<String> {
    split_sentences(&neutralize(description))
        .iter()
        .filter_map(|s| normalize_sentence(s))
        .collect()
}

fn pad(sentences: &mut Vec<String>, minimum: usize, pool: &[&str], index: usize) {
    let mut k = 0;
    while sentences.len() < minimum {
        sentences.push(pool[(index + k) % pool.len()].to_string());
        k += 1;
    }
}

/// Trims leading punctuation, capitalizes, and guarantees terminal
/// punctuation so joined sentences split back the same way.
fn normalize_sentence(sentence: &str) -> Option<String> {
    let trimmed = sentence
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        return None;
    }

    let mut out = capitalize(trimmed);
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    Some(out)
}

fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit()
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
