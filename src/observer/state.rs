//! Per-document extraction state: the text extract and open anchors.

use crate::patterns::WHITESPACE_NORMALIZE;
use crate::result::Record;
use crate::url_utils::truncate_chars;

/// Whether `c` may be merged into an adjacent whitespace character.
///
/// Non-breaking spaces are kept: they only reach the buffer from `<pre>`.
fn is_collapsible(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\u{00a0}' | '\u{2007}' | '\u{202f}')
}

/// Whitespace-normalized visible text of a document.
///
/// Outside `<pre>` the buffer never holds two adjacent whitespace
/// characters, and it never starts with whitespace.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    buf: String,
}

impl TextAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self { buf: String::with_capacity(8192) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops trailing whitespace and ends the buffer with exactly one newline.
    pub fn append_paragraph_separator(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let kept = self.buf.trim_end_matches(|c| c != '\n' && is_collapsible(c)).len();
        self.buf.truncate(kept);
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// Appends a space unless the buffer is empty or already ends in whitespace.
    pub fn append_space(&mut self) {
        if let Some(last) = self.buf.chars().next_back() {
            if !is_collapsible(last) {
                self.buf.push(' ');
            }
        }
    }

    /// Appends preformatted text unchanged.
    pub fn append_verbatim(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Appends text, folding whitespace and non-breaking spaces into spaces
    /// and dropping whitespace that follows whitespace, across calls.
    pub fn append_collapsed(&mut self, text: &str) {
        let mut prev = self.buf.chars().next_back().unwrap_or(' ');
        for c in text.chars() {
            let c = if c == '\u{00a0}' || is_collapsible(c) { ' ' } else { c };
            if !(is_collapsible(prev) && is_collapsible(c)) {
                self.buf.push(c);
            }
            prev = c;
        }
    }

    /// Takes the text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

/// An open `<a>` element: the link record being built and its text.
#[derive(Debug)]
pub struct AnchorFrame {
    /// `None` for anchors without `href`, which never produce a link.
    pub record: Option<Record>,
    text: String,
    chars: usize,
}

impl AnchorFrame {
    #[must_use]
    pub fn new(record: Option<Record>) -> Self {
        Self { record, text: String::new(), chars: 0 }
    }

    /// Whether the text has reached `max_chars`.
    #[must_use]
    pub fn is_full(&self, max_chars: usize) -> bool {
        self.chars >= max_chars
    }

    /// Appends as much of `text` as fits in `max_chars`.
    pub fn append_text(&mut self, text: &str, max_chars: usize) {
        let room = max_chars.saturating_sub(self.chars);
        let fitted = truncate_chars(text, room);
        self.chars += fitted.chars().count();
        self.text.push_str(fitted);
    }

    /// Closes the frame, producing the link record if there is one.
    ///
    /// The anchor text is entity-decoded, trimmed, whitespace-collapsed and
    /// cut to `max_chars`; an empty text is left out of the record.
    #[must_use]
    pub fn into_link(self, max_chars: usize) -> Option<Record> {
        let mut record = self.record?;
        let decoded = crate::entities::decode_attribute(&self.text);
        let collapsed = WHITESPACE_NORMALIZE.replace_all(decoded.trim(), " ");
        let text = truncate_chars(&collapsed, max_chars);
        if !text.is_empty() {
            record.push("text", text);
        }
        Some(record)
    }
}
