//! Token types shared by the base tokenizer and the CDATA lexer.
//!
//! Tokens borrow their text from the document source; tags own their
//! normalized names and attribute lists.

/// A single attribute of a tag, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, lower-cased.
    pub name: String,
    /// Raw (undecoded) value. `None` for a valueless attribute such as `<input disabled>`.
    pub value: Option<String>,
}

/// An open, close or empty-element tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, upper-cased.
    pub name: String,
    /// Attributes in source order. Duplicates are kept.
    pub attributes: Vec<Attribute>,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>` (or end of input).
    pub end: usize,
}

impl Tag {
    /// Value of the first attribute called `name` (ASCII case-insensitive).
    ///
    /// A valueless attribute counts as absent.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    /// Whether this tag has the given (upper-case) name.
    #[inline]
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// A run of character data or comment content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan<'a> {
    /// The raw content, still entity-encoded.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the last character.
    pub end: usize,
}

impl<'a> TextSpan<'a> {
    /// Slices `source[start..end]` into a span.
    ///
    /// Offsets must lie on char boundaries; out-of-range offsets are clamped
    /// and a misaligned range yields an empty span rather than a panic.
    #[must_use]
    pub fn from_source(source: &'a str, start: usize, end: usize) -> Self {
        let end = end.min(source.len());
        let start = start.min(end);
        let text = source.get(start..end).unwrap_or_default();
        Self { text, start, end }
    }
}

/// A lexical unit of an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    OpenTag(Tag),
    CloseTag(Tag),
    /// A self-closed tag such as `<br/>`.
    EmptyTag(Tag),
    Text(TextSpan<'a>),
    Comment(TextSpan<'a>),
}

impl Token<'_> {
    /// Byte offset where the token starts.
    #[must_use]
    pub fn start(&self) -> usize {
        match self {
            Token::OpenTag(tag) | Token::CloseTag(tag) | Token::EmptyTag(tag) => tag.start,
            Token::Text(span) | Token::Comment(span) => span.start,
        }
    }

    /// Byte offset just past the token.
    #[must_use]
    pub fn end(&self) -> usize {
        match self {
            Token::OpenTag(tag) | Token::CloseTag(tag) | Token::EmptyTag(tag) => tag.end,
            Token::Text(span) | Token::Comment(span) => span.end,
        }
    }

    /// Whether this is a non-empty open tag with the given (upper-case) name.
    #[must_use]
    pub fn is_open_tag_named(&self, name: &str) -> bool {
        matches!(self, Token::OpenTag(tag) if tag.is_named(name))
    }

    /// Whether this is a close tag with the given (upper-case) name.
    #[must_use]
    pub fn is_close_tag_named(&self, name: &str) -> bool {
        matches!(self, Token::CloseTag(tag) if tag.is_named(name))
    }

    /// The text of a Text token.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(span) => Some(span.text),
            _ => None,
        }
    }
}
