//! Header values.

use crate::address::Address;
use chrono::{DateTime, FixedOffset};
use std::borrow::Cow;

/// RFC 2822 date-time layout used for `Date` headers.
pub(crate) const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// The value of a header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// Unstructured text.
    Text(String),
    /// Several text values, in order.
    MultiText(Vec<String>),
    /// A single mailbox.
    Address(Address),
    /// Several mailboxes, in order.
    AddressList(Vec<Address>),
    /// A wall-clock reading, as used by `Date`.
    Timestamp(DateTime<FixedOffset>),
}

impl HeaderValue {
    /// Returns the value as a single line of text.
    ///
    /// Multi-valued text yields its first entry; an address list is
    /// rendered comma separated.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::MultiText(texts) => texts
                .first()
                .map_or(Cow::Borrowed(""), |t| Cow::Borrowed(t.as_str())),
            Self::Address(address) => Cow::Owned(address.to_string()),
            Self::AddressList(addresses) => Cow::Owned(
                addresses
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Self::Timestamp(at) => Cow::Owned(at.format(DATE_FORMAT).to_string()),
        }
    }

    /// Returns the bare address part of every mailbox in this value.
    ///
    /// Text is taken to be a bare address.
    #[must_use]
    pub fn addresses(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::MultiText(texts) => texts.iter().map(String::as_str).collect(),
            Self::Address(address) => vec![address.as_str()],
            Self::AddressList(addresses) => addresses.iter().map(Address::as_str).collect(),
            Self::Timestamp(_) => Vec::new(),
        }
    }

    /// Returns the mailboxes in this value, treating text as bare addresses.
    pub(crate) fn to_address_list(&self) -> Vec<Address> {
        match self {
            Self::Address(address) => vec![address.clone()],
            Self::AddressList(addresses) => addresses.clone(),
            Self::Timestamp(_) => vec![Address::new(self.as_text())],
            Self::Text(_) | Self::MultiText(_) => {
                self.addresses().into_iter().map(Address::new).collect()
            }
        }
    }

    /// Returns every text leaf in the value, used for validation.
    pub(crate) fn leaves(&self) -> Vec<Cow<'_, str>> {
        match self {
            Self::Text(text) => vec![Cow::Borrowed(text.as_str())],
            Self::MultiText(texts) => texts.iter().map(|t| Cow::Borrowed(t.as_str())).collect(),
            Self::Address(address) => address_leaves(address).collect(),
            Self::AddressList(addresses) => addresses.iter().flat_map(address_leaves).collect(),
            Self::Timestamp(_) => vec![self.as_text()],
        }
    }
}

fn address_leaves(address: &Address) -> impl Iterator<Item = Cow<'_, str>> {
    address
        .display_name
        .iter()
        .map(|name| Cow::Borrowed(name.as_str()))
        .chain(std::iter::once(Cow::Borrowed(address.address.as_str())))
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(value: Vec<String>) -> Self {
        Self::MultiText(value)
    }
}

impl From<Address> for HeaderValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<Vec<Address>> for HeaderValue {
    fn from(value: Vec<Address>) -> Self {
        Self::AddressList(value)
    }
}

impl From<DateTime<FixedOffset>> for HeaderValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(value)
    }
}
