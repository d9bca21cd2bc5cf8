//! # quillmail-message
//!
//! Plain text email messages and their RFC 5322 wire form.
//!
//! ## Features
//!
//! - **Header store**: ordered, position-addressed fields with canonical names
//! - **Injection guard**: CR/LF and non-UTF-8 content rejected on insertion
//! - **Header encoding**: address lists, message identifiers, dates, RFC 2047 text
//! - **Serialization**: `Date`/`Message-Id` filled in, Base64 UTF-8 body
//! - **Import**: unfolding and address decoding of raw messages
//! - **Transport seam**: hand the finished bytes to a mail transport agent
//!
//! ## Quick Start
//!
//! ### Building a Message
//!
//! ```
//! use quillmail_message::{Address, Message};
//!
//! let mut message = Message::new();
//! message.add_header("from", Address::with_name("Alice", "alice@example.com"))?;
//! message.add_header("to", "bob@example.com")?;
//! message.add_header("subject", "Hello")?;
//! message.set_body("Hi Bob,\nsee you soon.");
//!
//! let wire = message.to_bytes()?;
//! assert!(wire.starts_with(b"From: Alice <alice@example.com>\r\n"));
//! # Ok::<(), quillmail_message::Error>(())
//! ```
//!
//! ### Parsing a Message
//!
//! ```
//! use quillmail_message::Message;
//!
//! let message = Message::parse(b"From: Alice <alice@example.com>\r\nSubject: Hi\r\n\r\nHello")?;
//! assert_eq!(message.from_addresses(), vec!["alice@example.com"]);
//! assert_eq!(message.body(), "Hello");
//! # Ok::<(), quillmail_message::Error>(())
//! ```
//!
//! ### Deterministic Output
//!
//! ```
//! use std::sync::Arc;
//! use chrono::DateTime;
//! use quillmail_message::{Message, Serializer};
//! use quillmail_message::env::{FixedClock, FixedEntropy, StaticHostname};
//!
//! let at = DateTime::parse_from_rfc3339("2009-02-13T23:31:30+00:00").unwrap();
//! let serializer = Serializer::default()
//!     .with_clock(Arc::new(FixedClock::new(at)))
//!     .with_entropy(Arc::new(FixedEntropy(1)))
//!     .with_hostname(Arc::new(StaticHostname::new("example.com")));
//!
//! let mut message = Message::new();
//! let wire = serializer.serialize(&mut message)?;
//! let text = String::from_utf8(wire).unwrap();
//! assert!(text.starts_with("Date: Fri, 13 Feb 2009 23:31:30 +0000\r\n"));
//! assert!(text.contains("Message-Id: <1234567890.000000.1@example.com>\r\n"));
//! # Ok::<(), quillmail_message::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod combine;
mod error;
mod field;
mod header;
mod import;
mod message;
mod message_id;
mod name;
mod serialize;
mod transport;
mod validate;
mod value;

pub mod encoding;
pub mod env;

pub use address::{Address, decode_address, encode_address, encode_address_list};
pub use combine::{COMBINABLE, CombinedField, combine, is_combinable};
pub use error::{Error, Result};
pub use field::{FieldEncoding, FieldImport, encode_field};
pub use header::{HeaderField, HeaderStore};
pub use message::Message;
pub use message_id::MessageIdGenerator;
pub use name::canonicalize;
pub use serialize::{MIME_PREAMBLE, Serializer};
pub use transport::{Envelope, Mailer, Transport};
pub use validate::{validate_body, validate_header, validate_header_bytes};
pub use value::HeaderValue;
