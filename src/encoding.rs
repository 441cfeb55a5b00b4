//! Character encoding detection and transcoding.
//!
//! Archived payloads are raw bytes in whatever charset the server sent. The
//! encoding is taken, in order, from a byte-order mark, the `charset`
//! parameter of the HTTP `Content-Type` header, a `<meta>` declaration in the
//! first 1024 bytes, and finally defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Bytes of the payload searched for a `<meta>` charset declaration.
const META_SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">`, also found inside http-equiv content values
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("CHARSET_META_RE regex")
});

/// Match the charset parameter of a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"'\s;,]+)"#).expect("HEADER_CHARSET_RE regex")
});

/// Where the encoding of a payload was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    ByteOrderMark,
    ContentType,
    MetaTag,
    Default,
}

/// Detects the encoding of an HTML payload.
///
/// `content_type` is the HTTP `Content-Type` header value, if known.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> (&'static Encoding, EncodingSource) {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return (encoding, EncodingSource::ByteOrderMark);
    }

    if let Some(encoding) = content_type.and_then(header_charset).and_then(|c| Encoding::for_label(c.as_bytes())) {
        return (encoding, EncodingSource::ContentType);
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(META_SNIFF_LEN)]);
    if let Some(encoding) = meta_charset(&head).and_then(|c| Encoding::for_label(c.as_bytes())) {
        // A document readable as ASCII cannot really be UTF-16.
        return (encoding.output_encoding(), EncodingSource::MetaTag);
    }

    (UTF_8, EncodingSource::Default)
}

/// Charset parameter of a `Content-Type` header value.
fn header_charset(content_type: &str) -> Option<&str> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Charset declared by a `<meta>` element.
fn meta_charset(html: &str) -> Option<&str> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Transcode payload bytes to a UTF-8 string.
///
/// Conversion is lossy: malformed sequences become U+FFFD. A byte-order
/// mark is removed.
///
/// # Examples
///
/// ```
/// use webarchive_extract::encoding::transcode_to_utf8;
///
/// let html = b"<p>Caf\xE9</p>";
/// let text = transcode_to_utf8(html, Some("text/html; charset=ISO-8859-1"));
/// assert_eq!(text, "<p>Café</p>");
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8], content_type: Option<&str>) -> String {
    let (encoding, source) = detect_encoding(html, content_type);
    let (decoded, _, had_errors) = encoding.decode(html);
    if had_errors {
        debug!(encoding = encoding.name(), ?source, "malformed byte sequences replaced");
    }
    decoded.into_owned()
}
