//! Transfer encoding helpers.
//!
//! Base64 body encoding with MIME line wrapping, line break normalization,
//! and RFC 2047 encoded-words for header text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum line length for Base64 body lines.
const MAX_LINE_LENGTH: usize = 76;

/// Charset label used in encoded-words.
const CHARSET: &str = "UTF-8";

/// Longest encoded-word allowed by RFC 2047.
const MAX_ENCODED_WORD: usize = 75;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data, ignoring line breaks and other whitespace.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(cleaned)
}

/// Encodes data as Base64 split into 76 character lines, each ending in CRLF.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = encode_base64(data);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2 + 2);

    // Base64 output is ASCII, so byte chunks are valid str boundaries.
    for line in encoded.as_bytes().chunks(MAX_LINE_LENGTH) {
        out.push_str(std::str::from_utf8(line).unwrap_or_default());
        out.push_str("\r\n");
    }

    out
}

/// Replaces every `\r\n`, lone `\r`, and lone `\n` with `ending`.
#[must_use]
pub fn normalize_line_endings(text: &str, ending: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(ending);
            }
            '\n' => out.push_str(ending),
            _ => out.push(ch),
        }
    }

    out
}

/// Encodes header text as RFC 2047 `B` encoded-words when it has non-ASCII characters.
///
/// ASCII text is returned unchanged. Otherwise the text is split on character
/// boundaries into words of at most 75 characters, joined by a folding
/// line break.
#[must_use]
pub fn encode_rfc2047(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    // "=?UTF-8?B?" + "?=" around at most 60 base64 characters (45 bytes).
    let overhead = CHARSET.len() + 7;
    let max_bytes = (MAX_ENCODED_WORD - overhead) / 4 * 3;

    let mut words = Vec::new();
    let mut start = 0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if next - start > max_bytes && end > start {
            words.push(encoded_word(&text[start..end]));
            start = end;
        }
        end = next;
    }
    if end > start {
        words.push(encoded_word(&text[start..end]));
    }

    words.join("\r\n ")
}

fn encoded_word(chunk: &str) -> String {
    format!("=?{CHARSET}?B?{}?=", encode_base64(chunk.as_bytes()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode_decode() {
        let data = b"Hello, World!";
        let encoded = encode_base64(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

        let decoded = decode_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_base64_wrapped_line_lengths() {
        let data = vec![b'x'; 200];
        let wrapped = encode_base64_wrapped(&data);
        let lines: Vec<&str> = wrapped.split_terminator("\r\n").collect();

        assert!(wrapped.ends_with("\r\n"));
        assert_eq!(lines.len(), 4);
        assert!(lines[..3].iter().all(|l| l.len() == 76));
        assert!(lines[3].len() <= 76);
        assert_eq!(decode_base64(&wrapped).unwrap(), data);
    }

    #[test]
    fn test_base64_wrapped_empty() {
        assert_eq!(encode_base64_wrapped(b""), "");
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\nb", "\r\n"), "a\r\nb");
        assert_eq!(normalize_line_endings("a\rb", "\r\n"), "a\r\nb");
        assert_eq!(normalize_line_endings("a\r\nb", "\r\n"), "a\r\nb");
        assert_eq!(normalize_line_endings("a\n\rb", "\r\n"), "a\r\n\r\nb");
        assert_eq!(normalize_line_endings("a\r\n\r\nb", "\n"), "a\n\nb");
    }

    #[test]
    fn test_rfc2047_ascii_passthrough() {
        assert_eq!(encode_rfc2047("Hello"), "Hello");
        assert_eq!(encode_rfc2047("a=b?c"), "a=b?c");
    }

    #[test]
    fn test_rfc2047_encode() {
        assert_eq!(encode_rfc2047("Héllo"), "=?UTF-8?B?SMOpbGxv?=");
    }

    #[test]
    fn test_rfc2047_long_text_is_split() {
        let text = "ä".repeat(60);
        let encoded = encode_rfc2047(&text);
        let words: Vec<&str> = encoded.split("\r\n ").collect();

        assert!(words.len() > 1);
        let mut decoded = String::new();
        for word in words {
            assert!(word.len() <= 75, "encoded word too long: {word}");
            let inner = word
                .strip_prefix("=?UTF-8?B?")
                .and_then(|w| w.strip_suffix("?="))
                .unwrap();
            decoded.push_str(&String::from_utf8(decode_base64(inner).unwrap()).unwrap());
        }
        assert_eq!(decoded, text);
    }
}
