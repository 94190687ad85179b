use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};

/// `\x` followed by one or two hex digits, the escape OpenSSL writes for bytes
/// outside printable ASCII.
static HEX_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\x([0-9A-Fa-f]{1,2})").expect("hex escape pattern is valid")
});

/// Replaces every `\xHH` escape in `s` with the byte it encodes.
///
/// Escapes are resolved on raw bytes first and the result is only then read as
/// UTF-8, so a multi-byte character escaped one byte at a time (`\xD0\x98`) decodes
/// to a single `И`. Byte sequences that are not valid UTF-8 become U+FFFD.
///
/// # Example
/// ```
/// use certinspect::name::escape::unescape;
/// assert_eq!(unescape("Company \\x41\\x42\\x43"), "Company ABC");
/// assert_eq!(unescape("\\xD0\\x98\\xD0\\xB2\\xD0\\xB0\\xD0\\xBD"), "Иван");
/// ```
pub fn unescape(s: &str) -> String {
    match unescape_bytes(s.as_bytes()) {
        Cow::Borrowed(_) => s.to_string(),
        Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Byte-level half of [`unescape`].
pub fn unescape_bytes(input: &[u8]) -> Cow<'_, [u8]> {
    HEX_ESCAPE.replace_all(input, |caps: &Captures<'_>| [hex_byte(&caps[1])])
}

fn hex_byte(digits: &[u8]) -> u8 {
    digits.iter().fold(0u8, |acc, digit| {
        let nibble = (*digit as char).to_digit(16).unwrap_or(0) as u8;
        (acc << 4) | nibble
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii_escapes() {
        assert_eq!(unescape("Company \\x41\\x42\\x43"), "Company ABC");
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(unescape("CN=Alice/O=Example"), "CN=Alice/O=Example");
        assert_eq!(unescape(""), "");
        assert_eq!(unescape("back\\slash and \\xZZ"), "back\\slash and \\xZZ");
    }

    #[test]
    fn decodes_multibyte_utf8_sequences() {
        let escaped = "\\xD0\\x9E\\xD0\\x9E\\xD0\\x9E \\xD0\\xA0\\xD0\\xBE\\xD0\\xBC\\xD0\\xB0\\xD1\\x88\\xD0\\xBA\\xD0\\xB0";
        assert_eq!(unescape(escaped), "ООО Ромашка");
    }

    #[test]
    fn consumes_at_most_two_hex_digits() {
        assert_eq!(unescape("\\x41BC"), "ABC");
        assert_eq!(unescape("\\xD0\\x9Fabc"), "Пabc");
    }

    #[test]
    fn single_digit_escape() {
        assert_eq!(unescape("tab\\x9!"), "tab\t!");
    }

    #[test]
    fn lowercase_hex_digits() {
        assert_eq!(unescape("\\x6a\\x6B"), "jk");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(unescape("caf\\xE9"), "caf\u{FFFD}");
        assert_eq!(unescape_bytes(b"caf\\xE9").as_ref(), b"caf\xE9");
    }

    #[test]
    fn escapes_may_straddle_segment_separators() {
        assert_eq!(unescape("a\\x2Fb\\x3Dc"), "a/b=c");
    }
}
