//! Mailbox addresses in `Display Name <address>` form.

use crate::encoding::encode_rfc2047;
use std::fmt;

/// Separator between folded entries of a list-valued header.
pub(crate) const LIST_SEPARATOR: &str = ",\r\n ";

/// An email address with an optional display name.
///
/// No syntax validation is applied to the address part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Email address.
    pub address: String,
}

impl Address {
    /// Creates a bare address without a display name.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            display_name: None,
            address: address.into(),
        }
    }

    /// Creates an address with a display name.
    #[must_use]
    pub fn with_name(display_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            address: address.into(),
        }
    }

    /// Returns the address part.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => f.write_str(&self.address),
        }
    }
}

/// Decodes `"Display Name <address>"` into an [`Address`].
///
/// The input is trimmed. If it ends with `<address>` where the address is
/// non-empty and has no whitespace, the text before it becomes the display
/// name; an empty display name yields a bare address. Anything else is
/// returned as a bare address unchanged.
///
/// ```
/// use quillmail_message::{decode_address, Address};
///
/// assert_eq!(
///     decode_address(" Alice <alice@example.com> "),
///     Address::with_name("Alice", "alice@example.com")
/// );
/// assert_eq!(decode_address("bob@example.com"), Address::new("bob@example.com"));
/// ```
#[must_use]
pub fn decode_address(raw: &str) -> Address {
    let raw = raw.trim();

    let angle = raw
        .strip_suffix('>')
        .and_then(|rest| rest.rfind('<').map(|open| (&rest[..open], &rest[open + 1..])))
        .filter(|(_, address)| !address.is_empty() && !address.contains(char::is_whitespace));

    match angle {
        Some((display, address)) => {
            let display = display.trim();
            if display.is_empty() {
                Address::new(address.trim())
            } else {
                Address::with_name(display, address.trim())
            }
        }
        None => Address::new(raw),
    }
}

/// Encodes an address for a header line.
///
/// A bare address is returned unchanged; a display name is MIME encoded when
/// it contains non-ASCII text and followed by the bracketed address.
#[must_use]
pub fn encode_address(address: &Address) -> String {
    match &address.display_name {
        Some(name) => format!("{} <{}>", encode_rfc2047(name), address.address),
        None => address.address.clone(),
    }
}

/// Encodes a list of addresses, one per folded line.
#[must_use]
pub fn encode_address_list(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(encode_address)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::similar_names)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_with_display_name() {
        let addr = decode_address("John Doe <john@example.com>");
        assert_eq!(addr.display_name.as_deref(), Some("John Doe"));
        assert_eq!(addr.address, "john@example.com");
    }

    #[test]
    fn test_decode_empty_display_name() {
        assert_eq!(
            decode_address("  <john@example.com>"),
            Address::new("john@example.com")
        );
    }

    #[test]
    fn test_decode_no_brackets() {
        assert_eq!(decode_address("john@example.com"), Address::new("john@example.com"));
        assert_eq!(decode_address("not an address"), Address::new("not an address"));
    }

    #[test]
    fn test_decode_whitespace_inside_brackets_is_not_an_address() {
        assert_eq!(decode_address("Eve <a b>"), Address::new("Eve <a b>"));
    }

    #[test]
    fn test_decode_uses_last_bracket() {
        let addr = decode_address("\"<odd>\" <real@example.com>");
        assert_eq!(addr.display_name.as_deref(), Some("\"<odd>\""));
        assert_eq!(addr.address, "real@example.com");
    }

    #[test]
    fn test_decode_empty_brackets() {
        assert_eq!(decode_address("Name <>"), Address::new("Name <>"));
    }

    #[test]
    fn test_encode_address() {
        let addr = Address::with_name("A B", "a@b.com");
        assert_eq!(encode_address(&addr), "A B <a@b.com>");
        assert_eq!(encode_address(&Address::new("a@b.com")), "a@b.com");
    }

    #[test]
    fn test_encode_address_non_ascii_name() {
        let addr = Address::with_name("Jürgen", "j@example.de");
        assert_eq!(encode_address(&addr), "=?UTF-8?B?SsO8cmdlbg==?= <j@example.de>");
    }

    #[test]
    fn test_encode_address_list() {
        let list = [
            Address::with_name("Alice", "alice@example.com"),
            Address::new("bob@example.com"),
        ];
        assert_eq!(
            encode_address_list(&list),
            "Alice <alice@example.com>,\r\n bob@example.com"
        );
        assert_eq!(encode_address_list(&[]), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Address::with_name("Alice", "alice@example.com").to_string(),
            "Alice <alice@example.com>"
        );
        assert_eq!(Address::new("bob@example.com").to_string(), "bob@example.com");
    }

    proptest! {
        #[test]
        fn prop_decode_round_trips_plain_addresses(
            name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            local in "[a-z0-9.]{1,12}",
            domain in "[a-z]{1,12}\\.com",
        ) {
            let address = format!("{local}@{domain}");
            let addr = Address::with_name(name.clone(), address.clone());
            prop_assert_eq!(decode_address(&encode_address(&addr)), addr);
            prop_assert_eq!(decode_address(&address), Address::new(address.clone()));
        }
    }
}
