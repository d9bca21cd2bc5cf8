//! Per-header-name encoding and import rules.
//!
//! Each canonical header name maps to a rule through a static table; names
//! not listed use the default rule.

use crate::address::{LIST_SEPARATOR, decode_address, encode_address, encode_address_list};
use crate::combine::CombinedField;
use crate::encoding::encode_rfc2047;
use crate::error::Result;
use crate::header::HeaderStore;
use crate::value::{DATE_FORMAT, HeaderValue};

/// Encoding rule for a header field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// RFC 2822 date-time of the first value.
    Date,
    /// Every value as a folded address list.
    AddressList,
    /// The first value as a single address.
    Address,
    /// The first value in angle brackets.
    MessageId,
    /// Every value in angle brackets, folded.
    MessageIdList,
    /// The first value as unstructured text, encoded-words when non-ASCII.
    Text,
}

const ENCODINGS: &[(&str, FieldEncoding)] = &[
    ("Date", FieldEncoding::Date),
    ("To", FieldEncoding::AddressList),
    ("Cc", FieldEncoding::AddressList),
    ("From", FieldEncoding::AddressList),
    ("Sender", FieldEncoding::Address),
    ("Reply-To", FieldEncoding::Address),
    ("Message-Id", FieldEncoding::MessageId),
    ("In-Reply-To", FieldEncoding::MessageIdList),
    ("References", FieldEncoding::MessageIdList),
];

impl FieldEncoding {
    /// Looks up the rule for a canonical header name.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        ENCODINGS
            .iter()
            .find(|(known, _)| *known == name)
            .map_or(Self::Text, |(_, encoding)| *encoding)
    }

    /// Encodes the values of one field, without the name.
    #[must_use]
    pub fn encode(self, values: &[HeaderValue]) -> String {
        let Some(first) = values.first() else {
            return String::new();
        };

        match self {
            Self::Date => match first {
                HeaderValue::Timestamp(at) => at.format(DATE_FORMAT).to_string(),
                other => other.as_text().into_owned(),
            },
            Self::AddressList => {
                let addresses: Vec<_> = values
                    .iter()
                    .flat_map(HeaderValue::to_address_list)
                    .collect();
                encode_address_list(&addresses)
            }
            Self::Address => first
                .to_address_list()
                .first()
                .map(encode_address)
                .unwrap_or_default(),
            Self::MessageId => bracketed(&first.as_text()),
            Self::MessageIdList => values
                .iter()
                .flat_map(message_ids)
                .map(|id| bracketed(&id))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            Self::Text => encode_rfc2047(&first.as_text()),
        }
    }
}

/// Wraps an identifier in angle brackets, keeping brackets already present.
fn bracketed(id: &str) -> String {
    let bare = id
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(id);
    format!("<{bare}>")
}

fn message_ids(value: &HeaderValue) -> Vec<String> {
    match value {
        HeaderValue::MultiText(ids) => ids.clone(),
        other => vec![other.as_text().into_owned()],
    }
}

/// Encodes one combined field as a CRLF-terminated header line.
#[must_use]
pub fn encode_field(field: &CombinedField) -> String {
    let encoded = FieldEncoding::for_name(&field.name).encode(&field.values);
    format!("{}: {encoded}\r\n", field.name)
}

/// Import rule for a raw header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldImport {
    /// Decode the value as `Display Name <address>`.
    Address,
    /// Keep the trimmed value as text.
    Raw,
}

const IMPORTS: &[(&str, FieldImport)] = &[
    ("To", FieldImport::Address),
    ("Cc", FieldImport::Address),
    ("From", FieldImport::Address),
    ("Reply-To", FieldImport::Address),
];

impl FieldImport {
    /// Looks up the rule for a canonical header name.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        IMPORTS
            .iter()
            .find(|(known, _)| *known == name)
            .map_or(Self::Raw, |(_, import)| *import)
    }

    /// Adds the imported value to `headers` under `name`.
    ///
    /// # Errors
    ///
    /// Returns a validation error from the header store.
    pub fn import(self, headers: &mut HeaderStore, name: &str, value: &str) -> Result<usize> {
        match self {
            Self::Address => headers.add(name, decode_address(value)),
            Self::Raw => headers.add(name, value.trim()),
        }
    }
}
