//! Configuration options for metadata extraction.
//!
//! The `Options` struct holds the resource caps that keep extraction bounded
//! on adversarial pages, plus switches for the optional extraction features.

/// Configuration options for metadata extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use webarchive_extract::Options;
///
/// let options = Options {
///     trim_data_urls: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_text_len, 100);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum length (in characters) of anchor text and of the title.
    ///
    /// Default: `100`
    pub max_text_len: usize,

    /// Number of leading characters of a style block scanned for URLs.
    ///
    /// Style blocks can be megabytes of inlined data; anything past this
    /// limit is ignored.
    ///
    /// Default: `100000`
    pub css_scan_limit: usize,

    /// Longest `url(...)` argument (in characters) still treated as a URL.
    ///
    /// Default: `8000`
    pub css_url_max_len: usize,

    /// Cut `data:` URLs down to their media-type header.
    ///
    /// Default: `true`
    pub trim_data_urls: bool,

    /// Report `<html lang>` and `<html xml:lang>` as Meta records.
    ///
    /// Default: `true`
    pub extract_html_lang: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_text_len: 100,
            css_scan_limit: 100_000,
            css_url_max_len: 8000,
            trim_data_urls: true,
            extract_html_lang: true,
        }
    }
}
