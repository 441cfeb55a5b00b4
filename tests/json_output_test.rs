use serde_json::json;
use webarchive_extract::{extract_metadata, HtmlMetadata, MetadataSink, Record};

#[test]
fn full_document_layout() {
    let html = r#"<html lang="en"><head>
<title>Layout</title>
<base href="http://example.com/">
<meta name="description" content="d">
<link rel="stylesheet" href="s.css">
<script src="a.js"></script>
</head><body><p><a href="/x" rel="nofollow">X</a></p></body></html>"#;
    let md = extract_metadata(html);
    let value = match md.to_json() {
        Ok(value) => value,
        Err(err) => panic!("serialization failed: {err}"),
    };

    assert_eq!(
        value,
        json!({
            "Head": {
                "Title": "Layout",
                "Base": "http://example.com/",
                "Metas": [
                    {"name": "HTML@/lang", "content": "en"},
                    {"name": "description", "content": "d"}
                ],
                "Link": [{"path": "LINK@/href", "url": "s.css", "rel": "stylesheet"}],
                "Scripts": [{"path": "SCRIPT@/src", "url": "a.js"}]
            },
            "Links": [{"path": "A@/href", "url": "/x", "rel": "nofollow", "text": "X"}],
            "Text": "Layout\nX\n"
        })
    );
}

#[test]
fn serialized_keys_keep_extraction_order() {
    let md = extract_metadata(r#"<a title="t" href="u" target="_self">x</a>"#);
    let json = match serde_json::to_string(&md) {
        Ok(json) => json,
        Err(err) => panic!("serialization failed: {err}"),
    };
    assert_eq!(
        json,
        r#"{"Links":[{"path":"A@/href","url":"u","target":"_self","title":"t","text":"x"}],"Text":"x"}"#
    );
}

/// A sink that only counts, to check the observer works with any sink.
#[derive(Default)]
struct Counter {
    hrefs: usize,
    others: usize,
}

impl MetadataSink for Counter {
    fn add_href(&mut self, _record: Record) {
        self.hrefs += 1;
    }
    fn add_link(&mut self, _record: Record) {
        self.others += 1;
    }
    fn add_script(&mut self, _record: Record) {
        self.others += 1;
    }
    fn add_meta(&mut self, _record: Record) {
        self.others += 1;
    }
    fn set_title(&mut self, _title: String) {
        self.others += 1;
    }
    fn set_base_href(&mut self, _href: String) {
        self.others += 1;
    }
    fn set_text_extract(&mut self, _text: String) {
        self.others += 1;
    }
}

#[test]
fn custom_sink_receives_records() {
    let mut counter = Counter::default();
    let mut observer = webarchive_extract::ExtractingObserver::new(&mut counter);
    webarchive_extract::parse_document(
        r#"<title>t</title><img src="a.png"><a href="b">b</a><link href="c.css">"#,
        &mut observer,
    );
    assert_eq!(counter.hrefs, 2);
    // title, link, text
    assert_eq!(counter.others, 3);

    let md = HtmlMetadata::new();
    assert!(md.head.is_empty());
}
