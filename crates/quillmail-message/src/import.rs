//! Parsing raw messages back into the model.
//!
//! Import is deliberately simpler than serialization: encoded-words, dates
//! and the Base64 body are not decoded, so `parse(serialize(m))` only
//! reproduces plain ASCII headers exactly.

use crate::encoding::normalize_line_endings;
use crate::error::{Error, Result};
use crate::field::FieldImport;
use crate::header::HeaderStore;
use crate::message::Message;
use crate::name::canonicalize;
use crate::validate::validate_body;

impl Message {
    /// Parses a raw message.
    ///
    /// Line breaks may be CRLF, LF or CR. The header block ends at the first
    /// blank line; without one the whole input is treated as headers and the
    /// body is empty. Folded header lines are joined with a single space.
    /// `To`, `Cc`, `From` and `Reply-To` values are decoded as addresses;
    /// every other value is kept as trimmed text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the input is not UTF-8 and
    /// [`Error::MalformedHeader`] for a header line without a name and colon.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(raw).map_err(|_| Error::InvalidEncoding("message"))?;
        let text = normalize_line_endings(text, "\n");
        let (head, body) = text.split_once("\n\n").unwrap_or((text.as_str(), ""));

        let mut headers = HeaderStore::new();
        for line in unfold(head) {
            if line.is_empty() {
                continue;
            }

            let (name, value) = split_field(&line)?;
            FieldImport::for_name(&canonicalize(name)).import(&mut headers, name, value)?;
        }

        let body = validate_body(body.as_bytes())?.to_string();
        tracing::debug!(
            headers = headers.len(),
            body_bytes = body.len(),
            "imported message"
        );
        Ok(Self::from_parts(headers, body))
    }
}

/// Joins continuation lines (leading whitespace) onto the previous line.
fn unfold(head: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for line in head.split('\n') {
        let folded = line.starts_with(char::is_whitespace);
        match lines.last_mut() {
            Some(previous) if folded => {
                previous.push(' ');
                previous.push_str(line.trim_start());
            }
            _ => lines.push(line.to_string()),
        }
    }

    lines
}

fn split_field(line: &str) -> Result<(&str, &str)> {
    match line.split_once(':') {
        Some((name, value)) if !name.is_empty() && !name.contains(char::is_whitespace) => {
            Ok((name, value))
        }
        _ => {
            tracing::warn!(line = %line.escape_debug(), "malformed header line");
            Err(Error::MalformedHeader(line.to_string()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::similar_names)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::value::HeaderValue;

    #[test]
    fn test_parse_basic() {
        let raw = b"From: Alice <alice@example.com>\r\n\
                    To: bob@example.com\r\n\
                    Subject: Hello there\r\n\
                    \r\n\
                    Body text\r\n";
        let message = Message::parse(raw).unwrap();

        assert_eq!(
            message.header_value("From"),
            Some(&HeaderValue::from(Address::with_name("Alice", "alice@example.com")))
        );
        assert_eq!(
            message.header_value("To"),
            Some(&HeaderValue::from(Address::new("bob@example.com")))
        );
        assert_eq!(message.header_value("Subject"), Some(&HeaderValue::from("Hello there")));
        assert_eq!(message.body(), "Body text\n");
    }

    #[test]
    fn test_parse_canonicalizes_names() {
        let message = Message::parse(b"x-MAILER: test\n\n").unwrap();
        assert_eq!(message.header(0).unwrap().name, "X-Mailer");
    }

    #[test]
    fn test_parse_unfolds_continuations() {
        let raw = b"Subject: a long\r\n   subject\r\n\tline\r\nX-Other: v\r\n\r\nb";
        let message = Message::parse(raw).unwrap();
        assert_eq!(
            message.header_value("Subject"),
            Some(&HeaderValue::from("a long subject line"))
        );
        assert_eq!(message.header_value("X-Other"), Some(&HeaderValue::from("v")));
    }

    #[test]
    fn test_parse_reply_to_and_cc_are_addresses() {
        let raw = b"Reply-To: Desk <desk@example.com>\nCc: <cc@example.com>\nSender: S <s@example.com>\n\n";
        let message = Message::parse(raw).unwrap();
        assert_eq!(
            message.header_value("Reply-To"),
            Some(&HeaderValue::from(Address::with_name("Desk", "desk@example.com")))
        );
        assert_eq!(
            message.header_value("Cc"),
            Some(&HeaderValue::from(Address::new("cc@example.com")))
        );
        assert_eq!(
            message.header_value("Sender"),
            Some(&HeaderValue::from("S <s@example.com>"))
        );
    }

    #[test]
    fn test_parse_cr_line_endings() {
        let message = Message::parse(b"Subject: old mac\r\rline1\rline2").unwrap();
        assert_eq!(message.header_value("Subject"), Some(&HeaderValue::from("old mac")));
        assert_eq!(message.body(), "line1\nline2");
    }

    #[test]
    fn test_parse_keeps_repeated_headers() {
        let message = Message::parse(b"Received: a\nReceived: b\n\n").unwrap();
        assert_eq!(message.header_values("Received").len(), 2);
    }

    #[test]
    fn test_parse_value_with_colon() {
        let message = Message::parse(b"X-Url: http://example.com/a\n\n").unwrap();
        assert_eq!(
            message.header_value("X-Url"),
            Some(&HeaderValue::from("http://example.com/a"))
        );
    }

    #[test]
    fn test_parse_without_separator() {
        let message = Message::parse(b"Subject: only headers\n").unwrap();
        assert_eq!(message.header_value("Subject"), Some(&HeaderValue::from("only headers")));
        assert_eq!(message.body(), "");
    }

    #[test]
    fn test_parse_malformed_line() {
        assert!(matches!(
            Message::parse(b"Subject: ok\nthis line has no separator\n\nbody"),
            Err(Error::MalformedHeader(line)) if line == "this line has no separator"
        ));
        assert!(matches!(
            Message::parse(b": empty name\n\n"),
            Err(Error::MalformedHeader(_))
        ));
        assert!(matches!(
            Message::parse(b" leading: space\n\n"),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        assert!(matches!(
            Message::parse(b"Subject: ok\n\n\xff"),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_parse_empty_input() {
        let message = Message::parse(b"").unwrap();
        assert!(message.headers().is_empty());
        assert_eq!(message.body(), "");
    }
}
