//! # webarchive-extract
//!
//! Link, metadata and text extraction from the HTML payloads of web-archive
//! capture records.
//!
//! Pages are streamed through a lenient tokenizer and a CDATA-aware lexer
//! (so `<script>`/`<style>` bodies are never mistaken for markup) into an
//! observer that collects outlinks with their anchor text, head metadata,
//! style-sheet URLs and whitespace-normalized visible text.
//!
//! ## Quick Start
//!
//! ```rust
//! use webarchive_extract::extract_metadata;
//!
//! let html = r#"<html><head><title>My Page</title></head>
//! <body><h1>Hello</h1><p>See <a href="/docs">the docs</a>.</p></body></html>"#;
//!
//! let md = extract_metadata(html);
//! assert_eq!(md.head.title.as_deref(), Some("My Page"));
//! assert_eq!(md.links[0].get("url"), Some("/docs"));
//! assert_eq!(md.links[0].get("text"), Some("the docs"));
//! assert_eq!(md.text.as_deref(), Some("My Page\nHello\nSee the docs.\n"));
//! ```
//!
//! ## Robustness
//!
//! Extraction never fails. Unterminated script bodies, stray end tags,
//! broken entities and megabyte-sized style blocks all degrade to
//! best-effort output in linear time.

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// HTML tokenizer and the CDATA-aware lexer.
pub mod lexer;

/// HTML character reference decoding.
pub mod entities;

/// URL extraction from CSS and `onclick` handlers.
pub mod url_utils;

/// Document observer, tag catalogs and per-tag extraction.
pub mod observer;

/// Character encoding detection and transcoding.
pub mod encoding;

/// WET (WARC encapsulated text) output.
pub mod wet;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{extract_bytes, extract_metadata, extract_metadata_with_options, parse_document};
pub use observer::{ExtractingObserver, ParseObserver};
pub use options::Options;
pub use result::{Head, HtmlMetadata, MetadataSink, Record};
