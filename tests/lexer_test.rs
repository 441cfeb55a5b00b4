use webarchive_extract::lexer::{CdataLexer, HtmlTokenizer, Token};

fn lexer(html: &str) -> CdataLexer<'_, HtmlTokenizer<'_>> {
    CdataLexer::new(HtmlTokenizer::new(html))
}

fn assert_script_body(js: &str) {
    let html = format!("<script>{js}</script>");
    let mut l = lexer(&html);
    assert!(!l.in_script() && !l.in_style());

    let open = l.next_token().expect("open tag");
    assert!(open.is_open_tag_named("SCRIPT"));
    assert!(!l.in_script() && !l.in_style());

    let body = l.next_token().expect("body");
    assert!(l.in_script() && !l.in_style(), "not in script for {js:?}");
    assert_eq!(body.as_text(), Some(js));

    let close = l.next_token().expect("close tag");
    assert!(close.is_close_tag_named("SCRIPT"), "body of {js:?} split");
    assert!(!l.in_script() && !l.in_style());
    assert!(l.next_token().is_none());
}

#[test]
fn anchor_attributes_and_text() {
    let mut l = lexer(r#"<a HREF="foo">blem</a>"#);
    match l.next_token() {
        Some(Token::OpenTag(tag)) => {
            assert_eq!(tag.name, "A");
            assert_eq!(tag.attribute("href"), Some("foo"));
            assert_eq!(tag.attribute("HREF"), Some("foo"));
        }
        other => panic!("expected open tag, got {other:?}"),
    }
    assert_eq!(l.next_token().as_ref().and_then(Token::as_text), Some("blem"));
    assert!(l.next_token().expect("close").is_close_tag_named("A"));
    assert!(l.next_token().is_none());
}

#[test]
fn script_bodies_stay_whole() {
    for js in [
        "foo bar baz",
        "//<!--\n foo bar baz\n //-->",
        "<!-- foo bar baz -->",
        "//<!-- foo bar baz -->",
        "<!-- foo bar baz //-->",
        "\n//<!-- foo bar baz\n //-->",
        "if(1 < 2) { foo(); } ",
        "if(1 <n) { foo(); } ",
        "document.write(\"<b>bold</b>\"); ",
        "document.write(\"<script>bold<\\/script>\"); ",
        "<![CDATA[\n if(i<n) { foo() } // a comment \n ]]> ",
        "var script = '<script>alert(\"hello, world!\")<\\/script>'; console.log(script); ",
        "\n        var _hmt = _hmt || [];\n        (function() {\n        var hm = document.createElement(\"script\");\n        hm.src = \"https://#/hm.js?aba99f7fd4116f6c8c3d1650e8f8ec17\";\n        var s = document.getElementsByTagName(\"script\")[0]; \n        s.parentNode.insertBefore(hm, s);\n        })();\n    ",
    ] {
        assert_script_body(js);
    }
}

#[test]
fn style_body_and_flags() {
    let mut l = lexer("<style>foo bar baz</style>");
    assert!(l.next_token().expect("open").is_open_tag_named("STYLE"));
    assert!(!l.in_style());
    let body = l.next_token().expect("body");
    assert!(l.in_style() && !l.in_script());
    assert_eq!(body.as_text(), Some("foo bar baz"));
    assert!(l.next_token().expect("close").is_close_tag_named("STYLE"));
    assert!(!l.in_style());
}

#[test]
fn empty_and_self_closed_style() {
    let mut l = lexer("<style></style>");
    assert!(l.next_token().expect("open").is_open_tag_named("STYLE"));
    assert!(l.next_token().expect("close").is_close_tag_named("STYLE"));
    assert!(!l.in_style());

    let mut l = lexer("<style />");
    match l.next_token() {
        Some(Token::EmptyTag(tag)) => assert_eq!(tag.name, "STYLE"),
        other => panic!("expected empty tag, got {other:?}"),
    }
    assert!(!l.in_style() && !l.in_script());
    assert!(l.next_token().is_none());
}

#[test]
fn flags_reset_after_body() {
    let mut l = lexer("<script>a</script><p>b</p>");
    let kinds: Vec<(bool, bool)> = std::iter::from_fn(|| {
        l.next_token()?;
        Some((l.in_script(), l.in_style()))
    })
    .collect();
    assert_eq!(
        kinds,
        [(false, false), (true, false), (false, false), (false, false), (false, false), (false, false)]
    );
}

#[test]
fn text_after_unterminated_script_is_swallowed() {
    let html = "<p>before</p><script>var x = '</div>'; <p>after";
    let tokens: Vec<_> = lexer(html).collect();
    let last = tokens.last().expect("tokens");
    assert_eq!(last.as_text(), Some("var x = '</div>'; <p>after"));
}
