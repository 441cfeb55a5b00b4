//! Document traversal and record extraction.
//!
//! # Module Structure
//!
//! - `tags`: tag catalogs (block/inline layout, per-tag extraction rules)
//! - `state`: text extract buffer and open-anchor frames
//! - `handlers`: per-tag extraction into a [`MetadataSink`]
//!
//! [`ExtractingObserver`] consumes the events of one document, in order,
//! and writes links, metas, scripts, the title, the base URL and the
//! normalized text into a sink. It never fails: malformed markup only ever
//! degrades what is extracted.

pub mod handlers;
pub mod state;
pub mod tags;

use tracing::{debug, trace};

use crate::entities::{decode_attribute, decode_text};
use crate::lexer::{Tag, TextSpan};
use crate::options::Options;
use crate::patterns::WHITESPACE_NORMALIZE;
use crate::result::{MetadataSink, Record};
use crate::url_utils::{extract_css_urls, truncate_chars};

pub use state::{AnchorFrame, TextAccumulator};
pub use tags::{TagExtractor, TextBreak};

/// Receiver of document events, in document order.
///
/// Every callback defaults to a no-op.
pub trait ParseObserver {
    fn handle_document_start(&mut self) {}

    fn handle_tag_open(&mut self, _tag: &Tag) {}

    /// A self-closed tag such as `<br/>`.
    fn handle_tag_empty(&mut self, _tag: &Tag) {}

    fn handle_tag_close(&mut self, _tag: &Tag) {}

    /// Character data outside script and style bodies.
    fn handle_text(&mut self, _text: &TextSpan<'_>) {}

    /// The raw body of a `<script>` element.
    fn handle_script(&mut self, _text: &TextSpan<'_>) {}

    /// The raw body of a `<style>` element.
    fn handle_style(&mut self, _text: &TextSpan<'_>) {}

    fn handle_comment(&mut self, _text: &TextSpan<'_>) {}

    fn handle_document_complete(&mut self) {}
}

/// Observer extracting metadata records and the text of a document.
pub struct ExtractingObserver<'s, S: MetadataSink> {
    pub(crate) sink: &'s mut S,
    pub(crate) options: Options,
    pub(crate) anchors: Vec<AnchorFrame>,
    text: TextAccumulator,
    title: Option<String>,
    in_title: bool,
    in_pre: bool,
    svg_depth: usize,
}

impl<'s, S: MetadataSink> ExtractingObserver<'s, S> {
    /// Creates an observer with default options.
    pub fn new(sink: &'s mut S) -> Self {
        Self::with_options(sink, &Options::default())
    }

    pub fn with_options(sink: &'s mut S, options: &Options) -> Self {
        Self {
            sink,
            options: options.clone(),
            anchors: Vec::new(),
            text: TextAccumulator::new(),
            title: None,
            in_title: false,
            in_pre: false,
            svg_depth: 0,
        }
    }

    /// Text accumulated so far.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Number of `<a>` elements currently open.
    #[must_use]
    pub fn open_anchors(&self) -> usize {
        self.anchors.len()
    }

    fn apply_text_break(&mut self, tag: &str) {
        match tags::text_break(tag) {
            Some(TextBreak::Paragraph) => self.text.append_paragraph_separator(),
            Some(TextBreak::Space) => self.text.append_space(),
            None => {}
        }
    }

    fn start_tag(&mut self, tag: &Tag, empty: bool) {
        if tag.is_named("TITLE") && self.svg_depth == 0 {
            self.in_title = !empty;
            return;
        }
        if tag.is_named("PRE") {
            self.in_pre = true;
        } else if tag.is_named("SVG") && !empty {
            self.svg_depth += 1;
        }

        self.apply_text_break(&tag.name);
        self.extract_global_hrefs(tag);
        if let Some(extractor) = TagExtractor::for_tag(&tag.name) {
            self.extract(extractor, tag, empty);
        }
    }

    fn extract_global_hrefs(&mut self, tag: &Tag) {
        for attr in &tag.attributes {
            let Some(value) = attr.value.as_deref() else { continue };
            if tags::GLOBAL_HREF_ATTRIBUTES.contains(&attr.name.as_str()) {
                let url = self.url_value(value);
                let path = handlers::make_path(&tag.name, &attr.name);
                self.sink.add_href(Record::href(path, "url", url));
            }
        }
    }

    /// Decodes a URL-valued attribute, trimming `data:` payloads if enabled.
    pub(crate) fn url_value(&self, raw: &str) -> String {
        let decoded = decode_attribute(raw);
        if self.options.trim_data_urls {
            crate::url_utils::trim_data_url(&decoded).to_string()
        } else {
            decoded.into_owned()
        }
    }

    fn flush_title(&mut self) {
        self.in_title = false;
        if let Some(title) = self.title.take() {
            if !title.trim().is_empty() {
                self.sink.set_title(title);
            }
        }
    }

    fn reset(&mut self) {
        self.anchors.clear();
        self.title = None;
        self.in_title = false;
        self.in_pre = false;
        self.svg_depth = 0;
    }
}

impl<S: MetadataSink> ParseObserver for ExtractingObserver<'_, S> {
    fn handle_document_start(&mut self) {
        debug!("document start");
        self.reset();
    }

    fn handle_tag_open(&mut self, tag: &Tag) {
        self.start_tag(tag, false);
    }

    fn handle_tag_empty(&mut self, tag: &Tag) {
        self.start_tag(tag, true);
    }

    fn handle_tag_close(&mut self, tag: &Tag) {
        // Title content is character data: any end tag finishes it.
        if self.in_title {
            self.flush_title();
        }

        self.apply_text_break(&tag.name);

        match tag.name.as_str() {
            "A" => {
                let Some(frame) = self.anchors.pop() else {
                    trace!(offset = tag.start, "unmatched </a> ignored");
                    return;
                };
                if let Some(link) = frame.into_link(self.options.max_text_len) {
                    self.sink.add_href(link);
                }
            }
            "PRE" => self.in_pre = false,
            "SVG" => self.svg_depth = self.svg_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &TextSpan<'_>) {
        let decoded = decode_text(text.text);
        if self.in_pre {
            self.text.append_verbatim(&decoded);
        } else {
            self.text.append_collapsed(&decoded);
        }

        let max = self.options.max_text_len;
        let normalized = WHITESPACE_NORMALIZE.replace_all(&decoded, " ");
        let normalized = truncate_chars(&normalized, max);
        if self.in_title {
            self.title = Some(normalized.to_string());
            return;
        }
        // Innermost first: an enclosing anchor holds at least as much text.
        for frame in self.anchors.iter_mut().rev() {
            if frame.is_full(max) {
                break;
            }
            frame.append_text(normalized, max);
        }
    }

    fn handle_style(&mut self, text: &TextSpan<'_>) {
        let css = decode_attribute(text.text);
        for url in extract_css_urls(&css, &self.options) {
            self.sink.add_href(Record::href("STYLE/#text", "href", url));
        }
    }

    fn handle_document_complete(&mut self) {
        debug!(
            text_len = self.text.as_str().len(),
            unclosed_anchors = self.anchors.len(),
            "document complete"
        );
        if !self.text.is_empty() {
            self.sink.set_text_extract(self.text.take());
        }
        self.reset();
    }
}
