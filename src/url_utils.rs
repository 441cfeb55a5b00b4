//! URL pattern extraction from CSS text and `onclick` handlers.
//!
//! These are heuristics, not parsers: CSS is scanned with two regexes and
//! JavaScript handlers are matched against two fixed shapes. Every step is
//! linear in the input so that pathological pages (megabytes of quote
//! characters, huge inline style sheets) cannot stall extraction.

use tracing::debug;

use crate::options::Options;
use crate::patterns::{CSS_IMPORT, CSS_URL, ONCLICK_LOCATION, ONCLICK_OPEN};

/// Extracts URLs referenced by `url(...)` and `@import` in a style sheet.
///
/// Only the first `options.css_scan_limit` characters are scanned. Quotes
/// (optionally backslash-escaped) around each URL are stripped, empty results
/// dropped, and `data:` URLs cut to their header when enabled. All
/// `url(...)` matches come before all `@import` matches.
#[must_use]
pub fn extract_css_urls(css: &str, options: &Options) -> Vec<String> {
    let scanned = truncate_chars(css, options.css_scan_limit);
    if scanned.len() < css.len() {
        debug!(
            total_bytes = css.len(),
            scanned_bytes = scanned.len(),
            "style block truncated for URL scan"
        );
    }

    let mut urls = Vec::new();
    for caps in CSS_URL.captures_iter(scanned) {
        let Some(arg) = caps.get(1) else { continue };
        if exceeds_chars(arg.as_str(), options.css_url_max_len) {
            continue;
        }
        push_css_url(&mut urls, arg.as_str(), options);
    }
    for caps in CSS_IMPORT.captures_iter(scanned) {
        let Some(arg) = caps.get(1) else { continue };
        let target = arg.as_str();
        let target = target
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(target);
        push_css_url(&mut urls, target, options);
    }
    urls
}

fn push_css_url(urls: &mut Vec<String>, raw: &str, options: &Options) {
    let url = strip_quotes(raw);
    if url.is_empty() {
        return;
    }
    let url = if options.trim_data_urls { trim_data_url(url) } else { url };
    urls.push(url.to_string());
}

/// Strips runs of `"`, `'`, `\"` and `\'` from both ends of `s`.
///
/// Single forward and backward passes; inconsistent quoting such as
/// `''foo.gif'` or `\"foo.gif\"` is handled, and any amount of quotes costs
/// linear time.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    let is_quote = |c: u8| c == b'"' || c == b'\'';
    let mut start = 0;
    let mut end = b.len();

    loop {
        if start < end && is_quote(b[start]) {
            start += 1;
        } else if start + 1 < end && b[start] == b'\\' && is_quote(b[start + 1]) {
            start += 2;
        } else {
            break;
        }
    }
    while end > start && is_quote(b[end - 1]) {
        end -= 1;
        if end > start && b[end - 1] == b'\\' {
            end -= 1;
        }
    }
    &s[start..end]
}

/// Cuts a `data:` URL down to its header (`data:<type>[;params],`).
///
/// The payload of inlined images and fonts is useless as a link signal. The
/// URL is cut after the first `,`, or before the first whitespace, quote or
/// angle bracket if that comes earlier. Other URLs are returned unchanged.
#[must_use]
pub fn trim_data_url(url: &str) -> &str {
    let is_data = url.get(..5).is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));
    if !is_data {
        return url;
    }
    for (i, c) in url.char_indices() {
        if c == ',' {
            return &url[..=i];
        }
        if c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>') {
            return &url[..i];
        }
    }
    url
}

/// Finds a navigation target in an `onclick` handler.
///
/// Recognizes `[window.]location[.href] = '...'` as the whole handler and a
/// leading `window.open('...', ...)` / `parent.open(...)`. Returns the first
/// candidate only.
#[must_use]
pub fn extract_onclick_url(onclick: &str) -> Option<&str> {
    [&*ONCLICK_LOCATION, &*ONCLICK_OPEN].into_iter().find_map(|pattern| {
        pattern
            .captures(onclick)
            .and_then(|caps| caps.iter().skip(1).flatten().next())
            .map(|m| m.as_str())
    })
}

/// The longest prefix of `s` with at most `max_chars` characters.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn exceeds_chars(s: &str, max_chars: usize) -> bool {
    s.len() > max_chars && s.chars().nth(max_chars).is_some()
}
