//! Result types for metadata extraction output.
//!
//! The extraction core writes into a [`MetadataSink`]; [`HtmlMetadata`] is the
//! in-memory sink shipped with the crate and serializes to the HTML-Metadata
//! JSON layout used in web-archive metadata files.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// An extracted record: string key/value pairs in insertion order.
///
/// Link records conventionally start with `path` and `url` (or `href` for
/// style-sheet URLs), so consumers may rely on the first two positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a link record `{path, <url_key>: url}`.
    #[must_use]
    pub fn href(path: impl Into<String>, url_key: &str, url: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.push("path", path);
        record.push(url_key, url);
        record
    }

    /// Appends a field. Duplicate keys are kept.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Value of the first field called `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Receiver of extracted records.
///
/// Each call appends one record; no deduplication is performed.
pub trait MetadataSink {
    /// An outlink: anchors, images, frames, style-sheet URLs and the like.
    fn add_href(&mut self, record: Record);

    /// A `<link>` element from the document head.
    fn add_link(&mut self, record: Record);

    /// A `<script src>` reference.
    fn add_script(&mut self, record: Record);

    /// A `<meta>` element.
    fn add_meta(&mut self, record: Record);

    fn set_title(&mut self, title: String);

    fn set_base_href(&mut self, href: String);

    /// The normalized visible text of the document.
    fn set_text_extract(&mut self, text: String);
}

/// Records collected from the document head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Head {
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "Base", skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(rename = "Metas", skip_serializing_if = "Vec::is_empty")]
    pub metas: Vec<Record>,

    #[serde(rename = "Link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Record>,

    #[serde(rename = "Scripts", skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<Record>,
}

impl Head {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.base.is_none()
            && self.metas.is_empty()
            && self.links.is_empty()
            && self.scripts.is_empty()
    }
}

/// Metadata extracted from one HTML document.
///
/// Serializes as
/// `{"Head": {"Title", "Base", "Metas", "Link", "Scripts"}, "Links": [...], "Text": "..."}`
/// with empty members omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlMetadata {
    #[serde(rename = "Head", skip_serializing_if = "Head::is_empty")]
    pub head: Head,

    /// Outlinks in document order.
    #[serde(rename = "Links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Record>,

    #[serde(rename = "Text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl HtmlMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts to a JSON value in the HTML-Metadata layout.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Outlinks whose `path` equals `path`.
    pub fn links_with_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.links.iter().filter(move |r| r.get("path") == Some(path))
    }
}

impl MetadataSink for HtmlMetadata {
    fn add_href(&mut self, record: Record) {
        self.links.push(record);
    }

    fn add_link(&mut self, record: Record) {
        self.head.links.push(record);
    }

    fn add_script(&mut self, record: Record) {
        self.head.scripts.push(record);
    }

    fn add_meta(&mut self, record: Record) {
        self.head.metas.push(record);
    }

    fn set_title(&mut self, title: String) {
        self.head.title = Some(title);
    }

    fn set_base_href(&mut self, href: String) {
        self.head.base = Some(href);
    }

    fn set_text_extract(&mut self, text: String) {
        self.text = Some(text);
    }
}
