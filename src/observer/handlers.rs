//! Per-tag extraction rules.
//!
//! Every URL-valued attribute becomes a record whose `path` is
//! `<TAG>@/<attribute>`, so the provenance of each extracted URL is kept.

use crate::entities::decode_attribute;
use crate::lexer::Tag;
use crate::result::{MetadataSink, Record};
use crate::url_utils::extract_onclick_url;

use super::state::AnchorFrame;
use super::tags::{
    TagExtractor, ANCHOR_EXTRA_ATTRIBUTES, HTML_LANG_ATTRIBUTES, META_ATTRIBUTES,
};
use super::ExtractingObserver;

/// Separator between tag and attribute name in a record path.
pub const PATH_SEPARATOR: &str = "@/";

/// Builds the `path` value `<TAG>@/<attr>`.
#[must_use]
pub fn make_path(tag: &str, attr: &str) -> String {
    let mut path = String::with_capacity(tag.len() + PATH_SEPARATOR.len() + attr.len());
    path.push_str(tag);
    path.push_str(PATH_SEPARATOR);
    path.push_str(attr);
    path
}

impl<S: MetadataSink> ExtractingObserver<'_, S> {
    pub(super) fn extract(&mut self, extractor: TagExtractor, tag: &Tag, empty: bool) {
        match extractor {
            TagExtractor::Anchor => {
                let record = self.url_record(tag, "href", &ANCHOR_EXTRA_ATTRIBUTES);
                if empty {
                    if let Some(record) = record {
                        self.sink.add_href(record);
                    }
                } else {
                    self.anchors.push(AnchorFrame::new(record));
                }
            }
            TagExtractor::Area => {
                if let Some(record) = self.url_record(tag, "href", &["rel"]) {
                    self.sink.add_href(record);
                }
            }
            TagExtractor::Base => {
                if let Some(href) = tag.attribute("href") {
                    let href = self.url_value(href);
                    self.sink.set_base_href(href);
                }
            }
            TagExtractor::Form => {
                if let Some(record) = self.url_record(tag, "action", &["target", "method"]) {
                    self.sink.add_href(record);
                }
            }
            TagExtractor::Html => {
                if self.options.extract_html_lang {
                    self.extract_language(tag);
                }
            }
            TagExtractor::Img => {
                if let Some(record) = self.url_record(tag, "src", &["alt", "title"]) {
                    self.sink.add_href(record);
                }
                self.basic_hrefs(tag, &["longdesc"]);
            }
            TagExtractor::Input => {
                self.basic_hrefs(tag, &["src", "formaction"]);
                self.onclick_href(tag);
            }
            TagExtractor::Link => {
                if let Some(record) = self.url_record(tag, "href", &["rel", "type"]) {
                    self.sink.add_link(record);
                }
            }
            TagExtractor::Meta => {
                let record: Record = META_ATTRIBUTES
                    .iter()
                    .filter_map(|&name| tag.attribute(name).map(|v| (name, decode_attribute(v))))
                    .collect();
                if !record.is_empty() {
                    self.sink.add_meta(record);
                }
            }
            TagExtractor::Script => {
                if let Some(record) = self.url_record(tag, "src", &["type"]) {
                    self.sink.add_script(record);
                }
            }
            TagExtractor::Onclick => self.onclick_href(tag),
            TagExtractor::Basic(attrs) => self.basic_hrefs(tag, attrs),
        }
    }

    /// One `{path, url}` record per present attribute.
    fn basic_hrefs(&mut self, tag: &Tag, attrs: &[&str]) {
        for &attr in attrs {
            if let Some(value) = tag.attribute(attr) {
                let url = self.url_value(value);
                self.sink.add_href(Record::href(make_path(&tag.name, attr), "url", url));
            }
        }
    }

    /// `{path, url, extras...}` if `url_attr` is present.
    fn url_record(&self, tag: &Tag, url_attr: &str, extras: &[&str]) -> Option<Record> {
        let url = self.url_value(tag.attribute(url_attr)?);
        let mut record = Record::href(make_path(&tag.name, url_attr), "url", url);
        for &attr in extras {
            if let Some(value) = tag.attribute(attr) {
                record.push(attr, decode_attribute(value));
            }
        }
        Some(record)
    }

    /// The raw handler is matched; entity-quoted URLs are part of the patterns.
    fn onclick_href(&mut self, tag: &Tag) {
        let Some(url) = tag.attribute("onclick").and_then(extract_onclick_url) else {
            return;
        };
        self.sink.add_href(Record::href(make_path(&tag.name, "onclick"), "url", url));
    }

    fn extract_language(&mut self, tag: &Tag) {
        for &attr in &HTML_LANG_ATTRIBUTES {
            if let Some(lang) = tag.attribute(attr) {
                let mut record = Record::new();
                record.push("name", make_path(&tag.name, attr));
                record.push("content", decode_attribute(lang));
                self.sink.add_meta(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Attribute;
    use crate::observer::ParseObserver;
    use crate::result::HtmlMetadata;
    use crate::Options;

    fn tag(name: &str, attrs: &[(&str, &str)]) -> Tag {
        Tag {
            name: name.to_string(),
            attributes: attrs
                .iter()
                .map(|(n, v)| Attribute { name: (*n).to_string(), value: Some((*v).to_string()) })
                .collect(),
            start: 0,
            end: 0,
        }
    }

    fn run(tags: &[Tag]) -> HtmlMetadata {
        let mut md = HtmlMetadata::new();
        let mut obs = ExtractingObserver::new(&mut md);
        for t in tags {
            obs.handle_tag_empty(t);
        }
        md
    }

    #[test]
    fn make_path_joins_tag_and_attribute() {
        assert_eq!(make_path("IMG", "src"), "IMG@/src");
    }

    #[test]
    fn empty_anchor_emits_immediately() {
        let md = run(&[tag("A", &[("href", "x.html"), ("rel", "nofollow")])]);
        assert_eq!(
            md.links,
            vec![[("path", "A@/href"), ("url", "x.html"), ("rel", "nofollow")].into_iter().collect()]
        );
    }

    #[test]
    fn img_src_then_longdesc() {
        let md = run(&[tag("IMG", &[("longdesc", "d.html"), ("alt", "A &amp; B"), ("src", "i.png")])]);
        assert_eq!(md.links.len(), 2);
        assert_eq!(md.links[0].get("path"), Some("IMG@/src"));
        assert_eq!(md.links[0].get("alt"), Some("A & B"));
        assert_eq!(md.links[1].get("path"), Some("IMG@/longdesc"));
    }

    #[test]
    fn head_records() {
        let md = run(&[
            tag("BASE", &[("href", "http://www.example.com/")]),
            tag("LINK", &[("rel", "stylesheet"), ("href", "a.css")]),
            tag("SCRIPT", &[("src", "a.js"), ("type", "text/javascript")]),
            tag("META", &[("property", "og:description"), ("content", "Apostrophe&#39;s description")]),
        ]);
        assert_eq!(md.head.base.as_deref(), Some("http://www.example.com/"));
        assert_eq!(md.head.links[0].get("path"), Some("LINK@/href"));
        assert_eq!(md.head.links[0].get("rel"), Some("stylesheet"));
        assert_eq!(md.head.scripts[0].get("url"), Some("a.js"));
        assert_eq!(md.head.metas[0].get("content"), Some("Apostrophe's description"));
        assert!(md.links.is_empty());
    }

    #[test]
    fn html_lang_is_optional() {
        let html = tag("HTML", &[("lang", "en"), ("xml:lang", "en-US")]);
        let md = run(std::slice::from_ref(&html));
        assert_eq!(md.head.metas.len(), 2);
        assert_eq!(md.head.metas[1].get("name"), Some("HTML@/xml:lang"));

        let mut md = HtmlMetadata::new();
        let options = Options { extract_html_lang: false, ..Options::default() };
        ExtractingObserver::with_options(&mut md, &options).handle_tag_open(&html);
        assert!(md.head.metas.is_empty());
    }

    #[test]
    fn onclick_on_div_and_input() {
        let md = run(&[
            tag("DIV", &[("onclick", "location.href='webpage.html'")]),
            tag("INPUT", &[("onclick", "window.open('popup.html')")]),
            tag("DIV", &[("onclick", "toggle()")]),
        ]);
        let paths: Vec<_> = md.links.iter().filter_map(|l| l.get("path")).collect();
        assert_eq!(paths, ["DIV@/onclick", "INPUT@/onclick"]);
    }

    #[test]
    fn shared_rules_keep_tag_name_in_path() {
        let md = run(&[
            tag("IFRAME", &[("src", "f.html")]),
            tag("SOURCE", &[("src", "v.webm")]),
            tag("VIDEO", &[("poster", "p.gif")]),
            tag("INS", &[("cite", "why.html")]),
        ]);
        let paths: Vec<_> = md.links.iter().filter_map(|l| l.get("path")).collect();
        assert_eq!(paths, ["IFRAME@/src", "SOURCE@/src", "VIDEO@/poster", "INS@/cite"]);
    }

    #[test]
    fn data_urls_in_attributes_are_trimmed() {
        let md = run(&[tag("IMG", &[("src", "data:image/png;base64,AAAA")])]);
        assert_eq!(md.links[0].get("url"), Some("data:image/png;base64,"));
    }
}
