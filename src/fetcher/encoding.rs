//! Body decoding. Older sites are often served as Latin-1 or windows-1252
//! with only a `<meta>` declaration to say so.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How far into the body a `<meta>` charset declaration is looked for
const SNIFF_BYTES: usize = 1024;

static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("HEADER_CHARSET regex")
});

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("META_CHARSET regex")
});

/// Pick the body encoding: `Content-Type` charset first, then a `<meta charset>`
/// or `http-equiv` declaration near the top of the page, else UTF-8.
pub fn detect_encoding(content_type: Option<&str>, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = content_type.and_then(|ct| label_in(&HEADER_CHARSET, ct)) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_BYTES)]);
    label_in(&META_CHARSET, &head).unwrap_or(UTF_8)
}

/// Decode `body` to text. Bytes that are invalid in the chosen encoding
/// become U+FFFD.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> String {
    let encoding = detect_encoding(content_type, body);
    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        log::debug!("body had bytes invalid in {}", used.name());
    }
    text.into_owned()
}

fn label_in(pattern: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = pattern.captures(haystack)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}
