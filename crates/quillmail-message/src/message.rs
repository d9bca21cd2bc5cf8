//! Email message: header fields plus a text body.

use crate::error::Result;
use crate::header::{HeaderField, HeaderStore};
use crate::serialize::Serializer;
use crate::validate::validate_body;
use crate::value::HeaderValue;

/// A single text email message.
///
/// The body is kept exactly as given; line breaks are normalized to CRLF
/// only when the message is serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    headers: HeaderStore,
    body: String,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn from_parts(headers: HeaderStore, body: String) -> Self {
        Self { headers, body }
    }

    /// Returns the header store.
    #[must_use]
    pub const fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Returns the header store for modification.
    pub const fn headers_mut(&mut self) -> &mut HeaderStore {
        &mut self.headers
    }

    /// Gets the header at a position.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no header at the position.
    pub fn header(&self, pos: usize) -> Result<&HeaderField> {
        self.headers.get(pos)
    }

    /// Replaces the header at a position.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid content or a position past the end.
    pub fn set_header(&mut self, pos: usize, name: &str, value: impl Into<HeaderValue>) -> Result<()> {
        self.headers.set(pos, name, value)
    }

    /// Appends a header and returns its position.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value contains CR or LF.
    pub fn add_header(&mut self, name: &str, value: impl Into<HeaderValue>) -> Result<usize> {
        self.headers.add(name, value)
    }

    /// Removes the header at a position.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no header at the position.
    pub fn remove_header(&mut self, pos: usize) -> Result<HeaderField> {
        self.headers.remove(pos)
    }

    /// Finds the first header named `name` at or after `from`.
    #[must_use]
    pub fn find_header(&self, name: &str, from: usize) -> Option<usize> {
        self.headers.find(name, from)
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.value(name)
    }

    /// Returns every value of a header, in order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&HeaderValue> {
        self.headers.values(name)
    }

    /// Returns the bare addresses of every value of a header.
    #[must_use]
    pub fn addresses(&self, name: &str) -> Vec<&str> {
        self.headers
            .values(name)
            .into_iter()
            .flat_map(HeaderValue::addresses)
            .collect()
    }

    /// Returns the addresses in the From header(s).
    #[must_use]
    pub fn from_addresses(&self) -> Vec<&str> {
        self.addresses("From")
    }

    /// Returns the addresses in the To header(s).
    #[must_use]
    pub fn to_addresses(&self) -> Vec<&str> {
        self.addresses("To")
    }

    /// Returns the Return-Path address without angle brackets.
    #[must_use]
    pub fn return_path(&self) -> Option<String> {
        let path = match self.headers.value("Return-Path")? {
            HeaderValue::Address(address) => address.as_str().to_string(),
            HeaderValue::AddressList(list) => list.first()?.as_str().to_string(),
            value => value.as_text().trim_matches(['<', '>']).to_string(),
        };
        (!path.is_empty()).then_some(path)
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Sets the body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Sets the body from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not UTF-8.
    pub fn set_body_bytes(&mut self, body: &[u8]) -> Result<()> {
        self.body = validate_body(body)?.to_string();
        Ok(())
    }

    /// Serializes the message with the system clock, random source and host name.
    ///
    /// Missing `Date` and `Message-Id` headers are added to the message.
    ///
    /// # Errors
    ///
    /// Returns an error if a generated header fails validation.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        Serializer::default().serialize(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::similar_names)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::error::Error;

    #[test]
    fn test_message_new() {
        let message = Message::new();
        assert!(message.headers().is_empty());
        assert_eq!(message.body(), "");
    }

    #[test]
    fn test_header_delegation() {
        let mut message = Message::new();
        let pos = message.add_header("subject", "Hi").unwrap();
        assert_eq!(message.header(pos).unwrap().name, "Subject");
        assert_eq!(message.find_header("SUBJECT", 0), Some(pos));

        message.set_header(pos, "Subject", "Hello").unwrap();
        assert_eq!(message.header_value("subject"), Some(&HeaderValue::from("Hello")));

        message.remove_header(pos).unwrap();
        assert!(matches!(message.header(pos), Err(Error::OutOfRange(_))));
        assert!(message.header_values("subject").is_empty());
    }

    #[test]
    fn test_addresses() {
        let mut message = Message::new();
        message.add_header("From", Address::with_name("Alice", "alice@example.com")).unwrap();
        message.add_header("To", "bob@example.com").unwrap();
        message
            .add_header(
                "To",
                vec![Address::with_name("Carol", "carol@example.com"), Address::new("dan@example.com")],
            )
            .unwrap();

        assert_eq!(message.from_addresses(), vec!["alice@example.com"]);
        assert_eq!(
            message.to_addresses(),
            vec!["bob@example.com", "carol@example.com", "dan@example.com"]
        );
        assert!(message.addresses("Cc").is_empty());
    }

    #[test]
    fn test_return_path() {
        let mut message = Message::new();
        assert_eq!(message.return_path(), None);

        message.add_header("Return-Path", "<bounce@example.com>").unwrap();
        assert_eq!(message.return_path().as_deref(), Some("bounce@example.com"));

        let mut message = Message::new();
        message.add_header("return-path", "<>").unwrap();
        assert_eq!(message.return_path(), None);
    }

    #[test]
    fn test_return_path_typed_address() {
        let mut message = Message::new();
        message
            .add_header("Return-Path", Address::with_name("Bounces", "bounce@example.com"))
            .unwrap();
        assert_eq!(message.return_path().as_deref(), Some("bounce@example.com"));

        let mut message = Message::new();
        message
            .add_header(
                "Return-Path",
                vec![Address::with_name("First", "first@example.com"), Address::new("second@example.com")],
            )
            .unwrap();
        assert_eq!(message.return_path().as_deref(), Some("first@example.com"));

        let mut message = Message::new();
        message.add_header("Return-Path", Vec::<Address>::new()).unwrap();
        assert_eq!(message.return_path(), None);
    }

    #[test]
    fn test_body() {
        let mut message = Message::new();
        message.set_body("line\nnext");
        assert_eq!(message.body(), "line\nnext");

        message.set_body_bytes("naïve\r\n".as_bytes()).unwrap();
        assert_eq!(message.body(), "naïve\r\n");

        assert!(matches!(
            message.set_body_bytes(b"\xff"),
            Err(Error::InvalidEncoding("body"))
        ));
        assert_eq!(message.body(), "naïve\r\n");
    }
}
