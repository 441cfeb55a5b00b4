//! Tag catalogs driving text layout and link extraction.
//!
//! Tag names are upper-case, as produced by the tokenizer. Each catalog is
//! provided both as an array (for iteration) and a `HashSet` (for O(1) lookup).

use std::collections::HashSet;
use std::sync::LazyLock;

// === Text layout ===

/// Elements that always start a new paragraph in the text extract.
pub static BLOCK_ELEMENTS: [&str; 49] = [
    "ADDRESS", "ARTICLE", "ASIDE", "BLOCKQUOTE", "BODY", "BR", "BUTTON", "CANVAS", "CAPTION",
    "COL", "COLGROUP", "DD", "DIV", "DL", "DT", "EMBED", "FIELDSET", "FIGCAPTION", "FIGURE",
    "FOOTER", "FORM", "H1", "H2", "H3", "H4", "H5", "H6", "HEADER", "HGROUP", "HR", "LI",
    "MAP", "NOSCRIPT", "OBJECT", "OL", "OUTPUT", "P", "PRE", "PROGRESS", "SECTION", "TABLE",
    "TBODY", "TEXTAREA", "TFOOT", "TH", "THEAD", "TR", "UL", "VIDEO",
];

/// Inline elements whose content must not melt into neighbouring words.
pub static INLINE_SPACING_ELEMENTS: [&str; 16] = [
    "ADDRESS", "CITE", "DETAILS", "DATALIST", "IFRAME", "IMG", "INPUT", "LABEL", "LEGEND",
    "OPTGROUP", "Q", "SELECT", "SUMMARY", "TBODY", "TD", "TIME",
];

/// `BLOCK_ELEMENTS` as a `HashSet`
pub static BLOCK_ELEMENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLOCK_ELEMENTS.into_iter().collect());

/// `INLINE_SPACING_ELEMENTS` as a `HashSet`
pub static INLINE_SPACING_ELEMENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INLINE_SPACING_ELEMENTS.into_iter().collect());

/// Separator a tag inserts into the text extract when opened or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBreak {
    Paragraph,
    Space,
}

/// Layout effect of `tag` on the text extract. Block elements take precedence.
#[must_use]
pub fn text_break(tag: &str) -> Option<TextBreak> {
    if BLOCK_ELEMENT_SET.contains(tag) {
        Some(TextBreak::Paragraph)
    } else if INLINE_SPACING_ELEMENT_SET.contains(tag) {
        Some(TextBreak::Space)
    } else {
        None
    }
}

// === Link extraction ===

/// Attributes holding a URL on any element (lower-case).
pub static GLOBAL_HREF_ATTRIBUTES: [&str; 3] = ["background", "data-href", "data-uri"];

/// Attributes carried along with an anchor's `href`.
pub(crate) const ANCHOR_EXTRA_ATTRIBUTES: [&str; 6] =
    ["target", "alt", "title", "rel", "hreflang", "type"];

/// Attributes copied into a Meta record.
pub(crate) const META_ATTRIBUTES: [&str; 5] = ["name", "rel", "content", "http-equiv", "property"];

/// Language attributes of the root element.
pub(crate) const HTML_LANG_ATTRIBUTES: [&str; 2] = ["lang", "xml:lang"];

/// Per-tag extraction rule.
///
/// Tags sharing a rule (`FRAME`/`IFRAME`, `AUDIO`/`EMBED`/...) map to one
/// variant; the path of each record still uses the actual tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagExtractor {
    /// `A`: `href` with extras; links are emitted when the anchor closes.
    Anchor,
    /// `AREA`: `href` plus `rel`.
    Area,
    /// `BASE`: sets the document base URL.
    Base,
    /// `FORM`: `action` plus `target` and `method`.
    Form,
    /// `HTML`: document language.
    Html,
    /// `IMG`: `src` with `alt`/`title`; `longdesc` as a plain link.
    Img,
    /// `INPUT`: `src`, `formaction` and the onclick heuristic.
    Input,
    /// `LINK`: head link with `rel` and `type`.
    Link,
    /// `META`: copies the meta attributes.
    Meta,
    /// `SCRIPT`: `src` with `type`.
    Script,
    /// `DIV`: onclick heuristic only.
    Onclick,
    /// Tags whose URL attributes are emitted as plain links.
    Basic(&'static [&'static str]),
}

impl TagExtractor {
    /// Looks up the rule for an upper-case tag name.
    #[must_use]
    pub fn for_tag(name: &str) -> Option<Self> {
        let extractor = match name {
            "A" => Self::Anchor,
            "AREA" => Self::Area,
            "BASE" => Self::Base,
            "FORM" => Self::Form,
            "HTML" => Self::Html,
            "IMG" => Self::Img,
            "INPUT" => Self::Input,
            "LINK" => Self::Link,
            "META" => Self::Meta,
            "SCRIPT" => Self::Script,
            "DIV" => Self::Onclick,
            "APPLET" => Self::Basic(&["codebase", "cdata"]),
            "BUTTON" => Self::Basic(&["formaction"]),
            "EMBED" | "AUDIO" | "TRACK" | "SOURCE" | "FRAME" | "IFRAME" => Self::Basic(&["src"]),
            "VIDEO" => Self::Basic(&["src", "poster"]),
            "MENUITEM" => Self::Basic(&["icon"]),
            "OBJECT" => Self::Basic(&["codebase", "cdata", "data"]),
            "Q" | "BLOCKQUOTE" | "DEL" | "INS" => Self::Basic(&["cite"]),
            _ => return None,
        };
        Some(extractor)
    }
}
