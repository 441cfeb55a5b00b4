use webarchive_extract::entities::{decode_attribute, decode_char_ent, decode_text};
use webarchive_extract::extract_metadata;

#[test]
fn attribute_mode_table() {
    let cases = [
        ("&amp;", "&"),
        ("&apos;", "'"),
        ("&#039;", "'"),
        ("&comma;", ","),
        ("&percnt;", "%"),
        ("&rsquo;", "\u{2019}"),
        ("&raquo;", "\u{00bb}"),
        ("&hellip;", "\u{2026}"),
        ("&#x24191;", "\u{24191}"),
        ("&#x1F60A;", "\u{1F60A}"),
        ("&#x1f44e;", "\u{1F44E}"),
        ("&or;", "\u{2228}"),
        (
            "https://example.org/search?q=example&order=lexical",
            "https://example.org/search?q=example&order=lexical",
        ),
        (
            "https://example.org/search?q=example&amp;order=lexical",
            "https://example.org/search?q=example&order=lexical",
        ),
        ("&nbsp&nbsp&nbsp", "\u{a0}\u{a0}\u{a0}"),
        ("&nbsp", "\u{a0}"),
        ("&order", "&order"),
        (
            "https://example.org/search?q=example&nbsp=value",
            "https://example.org/search?q=example&nbsp=value",
        ),
        ("a&nbsp=&nbsp;b", "a&nbsp=\u{a0}b"),
        ("a&nbsp=&nbsp&order=true", "a&nbsp=\u{a0}&order=true"),
    ];
    for (input, expected) in cases {
        assert_eq!(decode_attribute(input), expected, "attribute mode: {input}");
        assert_eq!(decode_char_ent(input, true), expected, "attribute mode: {input}");
    }
}

#[test]
fn text_mode_table() {
    let cases = [
        ("law&order", "law&order"),
        ("a &or; b", "a \u{2228} b"),
        ("a &or b", "a &or b"),
        ("a &amp b", "a & b"),
        ("a&nbsp=&nbsp;c", "a\u{a0}=\u{a0}c"),
        ("a&nbsp=&nbsp&order=true", "a\u{a0}=\u{a0}&order=true"),
        ("&nbsp&nbsp&nbsp", "\u{a0}\u{a0}\u{a0}"),
        ("&copy2024", "\u{a9}2024"),
    ];
    for (input, expected) in cases {
        assert_eq!(decode_text(input), expected, "text mode: {input}");
    }
}

#[test]
fn invalid_code_points_do_not_panic() {
    for input in ["&#xd83f;", "&#x110000;", "&#2013266048;", "&#0;"] {
        assert_eq!(decode_attribute(input), input);
        assert_eq!(decode_text(input), input);
    }
    let mixed = decode_text("&#xd83f;&amp;&#x110000;&lt;");
    assert_eq!(mixed, "&#xd83f;&&#x110000;<");
}

#[test]
fn modes_applied_by_extraction() {
    let md = extract_metadata(
        r#"<a href="/s?q=a&copy=1&amp;x=&lt;" title="law&order &amp; more">fish &amp chips &copy2024</a>"#,
    );
    let link = &md.links[0];
    assert_eq!(link.get("url"), Some("/s?q=a&copy=1&x=<"));
    assert_eq!(link.get("title"), Some("law&order & more"));
    assert_eq!(link.get("text"), Some("fish & chips \u{a9}2024"));
    assert_eq!(md.text.as_deref(), Some("fish & chips \u{a9}2024"));
}

#[test]
fn decoding_is_linear_on_ampersand_floods() {
    let input = "&".repeat(200_000) + &"&amp".repeat(50_000);
    let start = std::time::Instant::now();
    let decoded = decode_text(&input);
    assert!(decoded.starts_with("&&&"));
    assert!(start.elapsed().as_secs() < 5, "decoding took {:?}", start.elapsed());
}
