//! Base HTML tokenizer.
//!
//! A lenient, single-pass tokenizer over a `&str`. It knows nothing about
//! raw-text elements: a `<script>` body is tokenized like any other markup.
//! Isolating script/style bodies is the job of [`CdataLexer`](super::CdataLexer),
//! which drives this tokenizer through the [`Tokenize`] trait and uses
//! [`Tokenize::next_raw_text`] while it waits for the closing tag.
//!
//! The scanner only ever cuts the source at ASCII structural bytes (`<`, `>`,
//! quotes, whitespace, `=` and `/`), so every slice boundary is a char
//! boundary even though scanning is byte-wise.

use super::token::{Attribute, Tag, TextSpan, Token};

const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &[u8] = b"<![CDATA[";
const CDATA_END: &str = "]]>";

/// The interface a base tokenizer offers to the CDATA lexer.
pub trait Tokenize<'a> {
    /// Returns the next ordinary token, or `None` at end of input.
    fn next_token(&mut self) -> Option<Token<'a>>;

    /// Parses character data up to the next `</` + letter.
    ///
    /// Returns `None` once no more un-tagged text can be produced at the
    /// current position.
    fn next_raw_text(&mut self) -> Option<Token<'a>>;

    /// The document being tokenized.
    fn source(&self) -> &'a str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    StartTag,
    EndTag,
    Comment,
    Declaration,
}

/// Lenient tokenizer for (possibly malformed) HTML.
#[derive(Debug, Clone)]
pub struct HtmlTokenizer<'a> {
    source: &'a str,
    pos: usize,
    // Searches for "-->" only ever move forward, so once one fails all later ones would too.
    comment_end_missing: bool,
}

impl<'a> HtmlTokenizer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            comment_end_missing: false,
        }
    }

    /// Current byte offset into the source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn markup_at(&self, i: usize) -> Option<Markup> {
        let b = self.bytes();
        if b.get(i) != Some(&b'<') {
            return None;
        }
        match b.get(i + 1)? {
            c if c.is_ascii_alphabetic() => Some(Markup::StartTag),
            b'/' if b.get(i + 2).is_some_and(u8::is_ascii_alphabetic) => Some(Markup::EndTag),
            b'!' if b[i..].starts_with(COMMENT_START) => Some(Markup::Comment),
            b'!' | b'?' => Some(Markup::Declaration),
            _ => None,
        }
    }

    fn find_comment_end(&mut self, from: usize) -> Option<usize> {
        if self.comment_end_missing {
            return None;
        }
        let found = self.source.get(from..)?.find(COMMENT_END).map(|rel| from + rel);
        if found.is_none() {
            self.comment_end_missing = true;
        }
        found
    }

    fn is_space(b: u8) -> bool {
        matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
    }

    fn text_token(&self, start: usize, end: usize) -> Token<'a> {
        Token::Text(TextSpan::from_source(self.source, start, end))
    }

    fn comment_token(&self, start: usize, end: usize) -> Token<'a> {
        Token::Comment(TextSpan::from_source(self.source, start, end))
    }

    fn lex_text(&mut self, start: usize) -> Token<'a> {
        let b = self.bytes();
        // The byte at `start` is text: either not '<' or a '<' that opens no markup.
        let mut i = start + 1;
        while i < b.len() {
            match b[i..].iter().position(|&c| c == b'<') {
                Some(rel) => {
                    i += rel;
                    if self.markup_at(i).is_some() {
                        break;
                    }
                    i += 1;
                }
                None => i = b.len(),
            }
        }
        self.pos = i;
        self.text_token(start, i)
    }

    fn lex_comment(&mut self, start: usize) -> Token<'a> {
        let b = self.bytes();
        let body = start + COMMENT_START.len();
        // "<!-->" and "<!--->" are empty comments.
        for abrupt in [&b">"[..], &b"->"[..]] {
            if b[body..].starts_with(abrupt) {
                self.pos = body + abrupt.len();
                return self.comment_token(body, body);
            }
        }
        match self.find_comment_end(body) {
            Some(end) => {
                self.pos = end + COMMENT_END.len();
                self.comment_token(body, end)
            }
            None => {
                self.pos = b.len();
                self.comment_token(body, b.len())
            }
        }
    }

    fn lex_declaration(&mut self, start: usize) -> Token<'a> {
        let b = self.bytes();
        let (body, terminator) = if b[start..].starts_with(CDATA_START) {
            (start + CDATA_START.len(), CDATA_END)
        } else {
            (start + 2, ">")
        };
        match self.source[body..].find(terminator) {
            Some(rel) => {
                self.pos = body + rel + terminator.len();
                self.comment_token(body, body + rel)
            }
            None => {
                self.pos = b.len();
                self.comment_token(body, b.len())
            }
        }
    }

    fn scan_name(&self, mut i: usize) -> usize {
        let b = self.bytes();
        while i < b.len() && !Self::is_space(b[i]) && !matches!(b[i], b'>' | b'/' | b'=') {
            i += 1;
        }
        i
    }

    fn skip_space(&self, mut i: usize) -> usize {
        let b = self.bytes();
        while i < b.len() && Self::is_space(b[i]) {
            i += 1;
        }
        i
    }

    fn lex_end_tag(&mut self, start: usize) -> Token<'a> {
        let b = self.bytes();
        let name_start = start + 2;
        let name_end = self.scan_name(name_start);
        let end = match b[name_end..].iter().position(|&c| c == b'>') {
            Some(rel) => name_end + rel + 1,
            None => b.len(),
        };
        self.pos = end;
        Token::CloseTag(Tag {
            name: self.source[name_start..name_end].to_ascii_uppercase(),
            attributes: Vec::new(),
            start,
            end,
        })
    }

    fn lex_attribute_value(&self, i: usize) -> (Option<String>, usize) {
        let b = self.bytes();
        match b.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = i + 1;
                match b[value_start..].iter().position(|&c| c == quote) {
                    Some(rel) => (
                        Some(self.source[value_start..value_start + rel].to_string()),
                        value_start + rel + 1,
                    ),
                    None => (Some(self.source[value_start..].to_string()), b.len()),
                }
            }
            Some(_) => {
                let mut j = i;
                while j < b.len() && !Self::is_space(b[j]) && b[j] != b'>' {
                    j += 1;
                }
                (Some(self.source[i..j].to_string()), j)
            }
            None => (Some(String::new()), i),
        }
    }

    fn lex_start_tag(&mut self, start: usize) -> Token<'a> {
        let b = self.bytes();
        let name_start = start + 1;
        let name_end = self.scan_name(name_start);
        let mut attributes = Vec::new();
        let mut empty = false;
        let mut i = name_end;

        loop {
            i = self.skip_space(i);
            let Some(&c) = b.get(i) else { break };
            match c {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' => {
                    if b.get(i + 1) == Some(&b'>') {
                        empty = true;
                        i += 2;
                        break;
                    }
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let attr_start = i;
            // A leading '=' belongs to the name.
            let attr_end = self.scan_name(if c == b'=' { i + 1 } else { i });
            i = self.skip_space(attr_end);

            let value = if b.get(i) == Some(&b'=') {
                let (value, next) = self.lex_attribute_value(self.skip_space(i + 1));
                i = next;
                value
            } else {
                None
            };
            attributes.push(Attribute {
                name: self.source[attr_start..attr_end].to_ascii_lowercase(),
                value,
            });
        }

        self.pos = i;
        let tag = Tag {
            name: self.source[name_start..name_end].to_ascii_uppercase(),
            attributes,
            start,
            end: i,
        };
        if empty {
            Token::EmptyTag(tag)
        } else {
            Token::OpenTag(tag)
        }
    }
}

impl<'a> Tokenize<'a> for HtmlTokenizer<'a> {
    fn next_token(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        if start >= self.source.len() {
            return None;
        }
        let token = match self.markup_at(start) {
            Some(Markup::StartTag) => self.lex_start_tag(start),
            Some(Markup::EndTag) => self.lex_end_tag(start),
            Some(Markup::Comment) => self.lex_comment(start),
            Some(Markup::Declaration) => self.lex_declaration(start),
            None => self.lex_text(start),
        };
        Some(token)
    }

    fn next_raw_text(&mut self) -> Option<Token<'a>> {
        let b = self.bytes();
        let start = self.pos;
        let mut i = start;
        while i < b.len() {
            let Some(rel) = b[i..].iter().position(|&c| c == b'<') else {
                i = b.len();
                break;
            };
            i += rel;
            if b[i..].starts_with(COMMENT_START) {
                // Markup inside a comment does not end character data.
                match self.find_comment_end(i + COMMENT_START.len()) {
                    Some(end) => {
                        i = end + COMMENT_END.len();
                        continue;
                    }
                    None => {
                        i += COMMENT_START.len();
                        continue;
                    }
                }
            }
            if b.get(i + 1) == Some(&b'/') && b.get(i + 2).is_some_and(u8::is_ascii_alphabetic) {
                break;
            }
            i += 1;
        }
        if i == start {
            return None;
        }
        self.pos = i;
        Some(self.text_token(start, i))
    }

    fn source(&self) -> &'a str {
        self.source
    }
}
