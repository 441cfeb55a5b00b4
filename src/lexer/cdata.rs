//! CDATA-aware lexer.
//!
//! Wraps a base tokenizer and re-emits its tokens unchanged, except that the
//! whole body of a `<script>` or `<style>` element comes out as a single
//! Text token. Markup-looking text inside the body (`document.write("<b>")`)
//! is swallowed into that token instead of being reported as tags.
//!
//! A missing close tag is not an error: the rest of the document becomes the
//! raw body. Archived pages are often truncated mid-script.

use tracing::trace;

use super::token::{TextSpan, Token};
use super::tokenizer::Tokenize;

const SCRIPT: &str = "SCRIPT";
const STYLE: &str = "STYLE";

/// What the lexer expects to read next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexerState {
    #[default]
    Default,
    /// Just returned a `<script>` open tag; its body comes next.
    AwaitingRawScript,
    /// Just returned a `<style>` open tag; its body comes next.
    AwaitingRawStyle,
}

impl LexerState {
    fn awaited_close_tag(self) -> Option<&'static str> {
        match self {
            LexerState::Default => None,
            LexerState::AwaitingRawScript => Some(SCRIPT),
            LexerState::AwaitingRawStyle => Some(STYLE),
        }
    }
}

/// Lexer isolating raw script and style bodies.
#[derive(Debug)]
pub struct CdataLexer<'a, T> {
    tokenizer: T,
    state: LexerState,
    // At most one token: the close tag that ended a raw body.
    cached: Option<Token<'a>>,
    in_script: bool,
    in_style: bool,
}

impl<'a, T: Tokenize<'a>> CdataLexer<'a, T> {
    #[must_use]
    pub fn new(tokenizer: T) -> Self {
        Self {
            tokenizer,
            state: LexerState::Default,
            cached: None,
            in_script: false,
            in_style: false,
        }
    }

    /// Whether the token just returned was the raw body of a `<script>`.
    #[must_use]
    pub fn in_script(&self) -> bool {
        self.in_script
    }

    /// Whether the token just returned was the raw body of a `<style>`.
    #[must_use]
    pub fn in_style(&self) -> bool {
        self.in_style
    }

    #[must_use]
    pub fn state(&self) -> LexerState {
        self.state
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.cached.take() {
            self.in_script = false;
            self.in_style = false;
            return Some(token);
        }

        if let Some(close_name) = self.state.awaited_close_tag() {
            if let Some(first) = self.tokenizer.next_raw_text() {
                return Some(self.coalesce_raw_body(close_name, first));
            }
        }

        let token = self.tokenizer.next_token()?;
        if token.is_open_tag_named(SCRIPT) {
            self.state = LexerState::AwaitingRawScript;
        } else if token.is_open_tag_named(STYLE) {
            self.state = LexerState::AwaitingRawStyle;
        } else if token.is_close_tag_named(SCRIPT) {
            self.state = LexerState::Default;
            self.in_script = false;
        } else if token.is_close_tag_named(STYLE) {
            self.state = LexerState::Default;
            self.in_style = false;
        }
        Some(token)
    }

    fn coalesce_raw_body(&mut self, close_name: &str, first: Token<'a>) -> Token<'a> {
        let start = first.start();
        let mut end = first.end();

        match self.state {
            LexerState::AwaitingRawScript => self.in_script = true,
            LexerState::AwaitingRawStyle => self.in_style = true,
            LexerState::Default => {}
        }
        self.state = LexerState::Default;

        loop {
            while let Some(more) = self.tokenizer.next_raw_text() {
                end = more.end();
            }
            // Character data stops only before "</" + letter, so this is an end tag or EOF.
            let Some(token) = self.tokenizer.next_token() else { break };
            if token.is_close_tag_named(close_name) {
                self.cached = Some(token);
                return self.raw_text(start, end);
            }
            end = token.end();
        }

        trace!(start, end, tag = close_name, "raw body runs to end of input");
        self.raw_text(start, end)
    }

    fn raw_text(&self, start: usize, end: usize) -> Token<'a> {
        Token::Text(TextSpan::from_source(self.tokenizer.source(), start, end))
    }
}

impl<'a, T: Tokenize<'a>> Iterator for CdataLexer<'a, T> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
