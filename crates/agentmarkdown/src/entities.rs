//! HTML character references.
//!
//! Markdown keeps inline HTML and character references as written, so text
//! reaches the output in its HTML source form. Only `<pre>` content is shown
//! decoded. Text from a parser that already decoded it is escaped back with
//! [`escape_html_text`]; raw text inside `<pre>` is decoded with
//! [`decode_html_entities`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CHARACTER_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);")
        .expect("CHARACTER_REFERENCE: hardcoded regex is valid")
});

fn named_reference(name: &str) -> Option<char> {
    let c = match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "bull" => '•',
        "middot" => '·',
        "deg" => '°',
        "times" => '×',
        "divide" => '÷',
        "plusmn" => '±',
        "sect" => '§',
        "para" => '¶',
        "cent" => '¢',
        "pound" => '£',
        "euro" => '€',
        "yen" => '¥',
        _ => return None,
    };
    Some(c)
}

fn numeric_reference(digits: &str) -> Option<char> {
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code).filter(|&c| c != '\0')
}

/// Decode named and numeric character references in `text`.
///
/// Unknown names and invalid code points are left as written.
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    CHARACTER_REFERENCE
        .replace_all(text, |caps: &Captures| {
            let reference = &caps[1];
            let decoded = match reference.strip_prefix('#') {
                Some(digits) => numeric_reference(digits),
                None => named_reference(reference),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Escape decoded text back to a form that reads the same once the Markdown
/// is rendered: `<` and `>` always, `&` only where it would start a
/// character reference.
pub fn escape_html_text(text: &str) -> String {
    if !text.contains(['&', '<', '>']) {
        return text.to_string();
    }
    CHARACTER_REFERENCE
        .replace_all(text, "&amp;${1};")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
