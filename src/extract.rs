//! Document driver: lexes a document and feeds its events to an observer.

use crate::encoding::transcode_to_utf8;
use crate::lexer::{CdataLexer, HtmlTokenizer, Token};
use crate::observer::{ExtractingObserver, ParseObserver};
use crate::options::Options;
use crate::result::HtmlMetadata;

/// Runs `observer` over every token of `html`, in document order.
///
/// Raw `<script>` and `<style>` bodies are delivered through
/// [`ParseObserver::handle_script`] and [`ParseObserver::handle_style`];
/// all other character data through [`ParseObserver::handle_text`].
pub fn parse_document<O: ParseObserver + ?Sized>(html: &str, observer: &mut O) {
    let mut lexer = CdataLexer::new(HtmlTokenizer::new(html));
    observer.handle_document_start();
    while let Some(token) = lexer.next_token() {
        match &token {
            Token::OpenTag(tag) => observer.handle_tag_open(tag),
            Token::EmptyTag(tag) => observer.handle_tag_empty(tag),
            Token::CloseTag(tag) => observer.handle_tag_close(tag),
            Token::Text(span) if lexer.in_script() => observer.handle_script(span),
            Token::Text(span) if lexer.in_style() => observer.handle_style(span),
            Token::Text(span) => observer.handle_text(span),
            Token::Comment(span) => observer.handle_comment(span),
        }
    }
    observer.handle_document_complete();
}

/// Extracts links, head metadata and text from an HTML document.
///
/// # Example
///
/// ```rust
/// use webarchive_extract::extract_metadata;
///
/// let md = extract_metadata(r#"<title>Hi</title><a href="foo">blem</a>"#);
/// assert_eq!(md.head.title.as_deref(), Some("Hi"));
/// assert_eq!(md.links[0].get("text"), Some("blem"));
/// ```
#[must_use]
pub fn extract_metadata(html: &str) -> HtmlMetadata {
    extract_metadata_with_options(html, &Options::default())
}

/// Extracts metadata with custom options.
#[must_use]
pub fn extract_metadata_with_options(html: &str, options: &Options) -> HtmlMetadata {
    let mut metadata = HtmlMetadata::new();
    let mut observer = ExtractingObserver::with_options(&mut metadata, options);
    parse_document(html, &mut observer);
    metadata
}

/// Extracts metadata from raw payload bytes.
///
/// `content_type` is the HTTP `Content-Type` header of the capture, used to
/// pick the character encoding.
#[must_use]
pub fn extract_bytes(html: &[u8], content_type: Option<&str>, options: &Options) -> HtmlMetadata {
    let html = transcode_to_utf8(html, content_type);
    extract_metadata_with_options(&html, options)
}
