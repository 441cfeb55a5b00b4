//! Compiled regex patterns for URL extraction and text normalization.
//!
//! All patterns are compiled once at first use using `LazyLock` and are
//! shared read-only between threads. The `regex` crate matches in linear
//! time and has no backreferences, so quote-pair alternatives that would
//! otherwise use `\1` are written out explicitly.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// CSS Patterns
// =============================================================================

/// Matches `url(...)` in CSS. Group 1 is the argument, quotes included.
///
/// The argument length cap is applied by the caller: a bounded repetition of
/// a Unicode class thousands of times over would blow up the compiled program.
pub static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"url\s*\(\s*([^)\s]+)\s*\)").expect("CSS_URL regex")
});

/// Matches `@import` targets not written as `url(...)`: quoted, parenthesized
/// or bare. Group 1 is the target with its delimiters.
pub static CSS_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"@import\s+((?:'[^']+')|(?:"[^"]+")|(?:\('[^']+'\))|(?:\("[^"]+"\))|(?:\([^)]+\))|(?:[a-z0-9_.:/\\-]+))\s*;"#,
    )
    .expect("CSS_IMPORT regex")
});

// =============================================================================
// JavaScript onclick Patterns
// =============================================================================

/// Matches `[window.]location[.href] = 'url'` as a whole handler.
/// The URL is in group 1 (plain quotes) or group 2 (`&#39;` quotes).
pub static ONCLICK_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:javascript:)?(?:(?:window|top|document|self|parent)\.)?location(?:\.href)?\s*=\s*(?:'([^'"]{3,256})'|&#39;([^'"]{3,256})&#39;)$"#,
    )
    .expect("ONCLICK_LOCATION regex")
});

/// Matches `window.open('url', ...)` / `parent.open("url")` at the start of a handler.
/// The URL is in group 1, 2 or 3 depending on the quoting.
pub static ONCLICK_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:javascript:)?(?:window|parent)\.open\((?:'([^"']{3,256}?)'|"([^"']{3,256}?)"|&#39;([^"']{3,256}?)&#39;)[,)]"#,
    )
    .expect("ONCLICK_OPEN regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});
