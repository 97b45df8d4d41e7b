//! Decoding of captured HTML bytes.
//!
//! Saved pages are not always UTF-8. The charset is taken from a byte-order
//! mark, then from a `<meta>` declaration near the top of the document, and
//! defaults to UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes searched for a `<meta>` charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// `<meta charset=...>` or `<meta http-equiv=Content-Type content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("META_CHARSET regex")
});

/// The charset label declared in a `<meta>` tag, if any.
#[must_use]
pub fn declared_charset(head: &str) -> Option<&str> {
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Detect the encoding of `html`.
///
/// Unknown labels are ignored and UTF-8 is assumed.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode `html` to a UTF-8 string.
///
/// Malformed sequences become U+FFFD; decoding never fails.
///
/// # Examples
///
/// ```
/// use rs_mdclean::encoding::decode_html;
///
/// let bytes = b"<meta charset=\"iso-8859-1\"><p>Caf\xe9</p>";
/// assert!(decode_html(bytes).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    decoded.into_owned()
}
