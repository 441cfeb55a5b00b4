//! HTML lexing.
//!
//! # Module Structure
//!
//! - `token`: token and tag types
//! - `tokenizer`: the [`Tokenize`] interface and the lenient [`HtmlTokenizer`]
//! - `cdata`: [`CdataLexer`], which coalesces script/style bodies into single Text tokens
//!
//! # Usage
//!
//! ```rust
//! use webarchive_extract::lexer::{CdataLexer, HtmlTokenizer, Token};
//!
//! let mut lexer = CdataLexer::new(HtmlTokenizer::new("<script>a<b</script>"));
//! assert!(lexer.next_token().is_some_and(|t| t.is_open_tag_named("SCRIPT")));
//! let body = lexer.next_token();
//! assert!(lexer.in_script());
//! assert_eq!(body.as_ref().and_then(Token::as_text), Some("a<b"));
//! ```

pub mod cdata;
pub mod token;
pub mod tokenizer;

pub use cdata::{CdataLexer, LexerState};
pub use token::{Attribute, Tag, TextSpan, Token};
pub use tokenizer::{HtmlTokenizer, Tokenize};
