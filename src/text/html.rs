use std::sync::LazyLock;

use regex::{Captures, Regex};

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<[A-Za-z/!?](?:"[^"]*"|'[^']*'|[^'">])*>"#)
        .expect("valid markup regex")
});
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9A-Fa-f]+)|([A-Za-z][A-Za-z0-9]*));")
        .expect("valid entity regex")
});

/// Escape text for insertion as element content.
///
/// Only `&`, `<` and `>` are replaced, which is what a browser produces when
/// serializing a text node. Quotes and whitespace are kept.
pub fn html_encode(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Escape text for insertion inside a quoted attribute value.
pub fn html_encode_attribute(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Text content of an HTML fragment: markup is dropped, then character
/// references are decoded.
///
/// A `<` that cannot open a tag is kept as text. Unknown named references
/// pass through unchanged. Numeric references outside the Unicode scalar
/// range decode to U+FFFD.
pub fn html_decode(value: &str) -> String {
    let text = MARKUP_RE.replace_all(value, "");
    ENTITY_RE
        .replace_all(&text, |caps: &Captures| {
            if let Some(dec) = caps.get(1) {
                return numeric_reference(dec.as_str().parse().ok()).to_string();
            }
            if let Some(hex) = caps.get(2) {
                return numeric_reference(u32::from_str_radix(hex.as_str(), 16).ok()).to_string();
            }
            match named_reference(&caps[3]) {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn numeric_reference(code: Option<u32>) -> char {
    code.filter(|&c| c != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn named_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}
