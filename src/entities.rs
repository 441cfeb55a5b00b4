//! HTML character reference decoding.
//!
//! Two modes share one decoder:
//!
//! - **attribute mode** is conservative. Attribute values are mostly URLs, and
//!   query strings carry literal ampersands (`?q=x&order=y`). A legacy named
//!   reference without `;` is only decoded when the next character is neither
//!   `=` nor alphanumeric, and numeric references need their `;`.
//! - **text mode** decodes legacy names without `;` wherever they occur
//!   (`a &amp b` becomes `a & b`) and accepts numeric references without `;`.
//!
//! In both modes names are matched longest-first against the WHATWG list, so
//! `&notin;` is `∉` while `&notit;` is `¬it;` in text. Non-legacy names are
//! never decoded without `;`: `law&order` stays as is even though `&or;` exists.
//!
//! A reference that fails to decode (unknown name, surrogate or out-of-range
//! code point, `&#0;`) is kept literally and decoding carries on.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Longest entity name in the WHATWG list (`CounterClockwiseContourIntegral;`).
const MAX_NAME_LEN: usize = 32;

/// Longest legacy name that may appear without `;` (`middot`, `frac34`, ...).
const MAX_LEGACY_NAME_LEN: usize = 6;

/// Entity name (without `&`, with `;` where the list has it) to replacement text.
static NAMED_REFERENCES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    entities::ENTITIES
        .iter()
        .map(|e| (e.entity.trim_start_matches('&'), e.characters))
        .collect()
});

/// Decodes character references in `text`.
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
#[must_use]
pub fn decode_char_ent(text: &str, in_attribute: bool) -> Cow<'_, str> {
    let Some(first) = text.find('&') else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut rest = &text[first..];

    loop {
        // `rest` starts with '&' here.
        match decode_reference(rest, in_attribute, &mut out) {
            Some(consumed) => rest = &rest[consumed..],
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
        match rest.find('&') {
            Some(next) => {
                out.push_str(&rest[..next]);
                rest = &rest[next..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    Cow::Owned(out)
}

/// Decodes an attribute value (conservative mode).
#[inline]
#[must_use]
pub fn decode_attribute(text: &str) -> Cow<'_, str> {
    decode_char_ent(text, true)
}

/// Decodes character data (aggressive mode).
#[inline]
#[must_use]
pub fn decode_text(text: &str) -> Cow<'_, str> {
    decode_char_ent(text, false)
}

/// Decodes the reference at the start of `rest` into `out`.
///
/// Returns the number of bytes consumed, or `None` if `rest` does not start
/// with a decodable reference (nothing is written then).
fn decode_reference(rest: &str, in_attribute: bool, out: &mut String) -> Option<usize> {
    let b = rest.as_bytes();
    if b.get(1) == Some(&b'#') {
        return decode_numeric(rest, in_attribute, out);
    }

    let name_len = b[1..]
        .iter()
        .take(MAX_NAME_LEN)
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }

    if b.get(1 + name_len) == Some(&b';') {
        if let Some(chars) = NAMED_REFERENCES.get(&rest[1..=1 + name_len]) {
            out.push_str(chars);
            return Some(name_len + 2);
        }
    }

    for len in (2..=name_len.min(MAX_LEGACY_NAME_LEN)).rev() {
        let Some(chars) = NAMED_REFERENCES.get(&rest[1..=len]) else {
            continue;
        };
        let next = b.get(1 + len);
        if in_attribute && next.is_some_and(|&c| c == b'=' || c.is_ascii_alphanumeric()) {
            return None;
        }
        out.push_str(chars);
        return Some(1 + len);
    }
    None
}

fn decode_numeric(rest: &str, in_attribute: bool, out: &mut String) -> Option<usize> {
    let b = rest.as_bytes();
    let (radix, digits_start) = match b.get(2) {
        Some(b'x' | b'X') => (16, 3),
        _ => (10, 2),
    };
    let digits_len = b[digits_start.min(b.len())..]
        .iter()
        .take_while(|c| if radix == 16 { c.is_ascii_hexdigit() } else { c.is_ascii_digit() })
        .count();
    if digits_len == 0 {
        return None;
    }
    let digits_end = digits_start + digits_len;
    let terminated = b.get(digits_end) == Some(&b';');
    if !terminated && in_attribute {
        return None;
    }

    let code = u32::from_str_radix(&rest[digits_start..digits_end], radix).ok()?;
    if code == 0 || (0xD800..=0xDFFF).contains(&code) || code > 0x0010_FFFF {
        return None;
    }
    out.push(char::from_u32(code)?);
    Some(digits_end + usize::from(terminated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ampersand_borrows() {
        assert!(matches!(decode_text("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn legacy_names_fit_the_length_bound() {
        let longest = NAMED_REFERENCES
            .keys()
            .filter(|k| !k.ends_with(';'))
            .map(|k| k.len())
            .max();
        assert_eq!(longest, Some(MAX_LEGACY_NAME_LEN));
        assert!(NAMED_REFERENCES.keys().all(|k| k.len() <= MAX_NAME_LEN));
    }

    #[test]
    fn decodes_basic_references_in_both_modes() {
        for mode in [true, false] {
            assert_eq!(decode_char_ent("&amp;", mode), "&");
            assert_eq!(decode_char_ent("&apos;", mode), "'");
            assert_eq!(decode_char_ent("&#039;", mode), "'");
            assert_eq!(decode_char_ent("&comma;", mode), ",");
            assert_eq!(decode_char_ent("&percnt;", mode), "%");
            assert_eq!(decode_char_ent("&rsquo;", mode), "\u{2019}");
            assert_eq!(decode_char_ent("&raquo;", mode), "\u{00bb}");
            assert_eq!(decode_char_ent("&hellip;", mode), "\u{2026}");
            assert_eq!(decode_char_ent("&#x24191;", mode), "\u{24191}");
            assert_eq!(decode_char_ent("&#x1F60A;", mode), "\u{1F60A}");
            assert_eq!(decode_char_ent("&#x1f44e;", mode), "\u{1F44E}");
            assert_eq!(decode_char_ent("&or;", mode), "\u{2228}");
        }
    }

    #[test]
    fn invalid_code_points_stay_literal() {
        for input in ["&#xd83f;", "&#x110000;", "&#2013266048;", "&#0;", "&#99999999999999999999;"] {
            assert_eq!(decode_attribute(input), input);
            assert_eq!(decode_text(input), input);
        }
        assert_eq!(decode_text("&#0;&amp;"), "&#0;&");
    }

    #[test]
    fn unterminated_numeric_only_in_text() {
        assert_eq!(decode_text("&#65 x"), "A x");
        assert_eq!(decode_attribute("&#65 x"), "&#65 x");
    }

    #[test]
    fn longest_match_wins() {
        assert_eq!(decode_text("&notin;"), "\u{2209}");
        assert_eq!(decode_text("&notit;"), "\u{00ac}it;");
        assert_eq!(decode_attribute("&notit;"), "&notit;");
    }

    #[test]
    fn lone_and_unknown_ampersands() {
        assert_eq!(decode_text("a & b"), "a & b");
        assert_eq!(decode_text("&&amp;&"), "&&&");
        assert_eq!(decode_text("&bogus;"), "&bogus;");
        assert_eq!(decode_text("tail&"), "tail&");
        assert_eq!(decode_text("&#;&#x;"), "&#;&#x;");
    }
}
