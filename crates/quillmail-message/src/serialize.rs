//! Wire serialization.

use crate::combine::combine;
use crate::encoding::{encode_base64_wrapped, normalize_line_endings};
use crate::env::{Clock, Entropy, Hostname, SystemClock};
use crate::error::Result;
use crate::field::encode_field;
use crate::message::Message;
use crate::message_id::MessageIdGenerator;
use crate::value::HeaderValue;
use std::fmt;
use std::sync::Arc;

/// MIME headers appended after the message's own header block.
pub const MIME_PREAMBLE: &str = "MIME-Version: 1.0\r\n\
                                 Content-Type: text/plain; charset=UTF-8\r\n\
                                 Content-Transfer-Encoding: base64\r\n";

/// Turns a [`Message`] into RFC 5322 wire bytes.
///
/// The output is the encoded header block, the MIME preamble, a blank line,
/// and the body as CRLF-normalized Base64 in 76 character lines.
#[derive(Clone)]
pub struct Serializer {
    clock: Arc<dyn Clock>,
    message_ids: MessageIdGenerator,
}

impl Serializer {
    /// Creates a serializer from a clock and a message identifier generator.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, message_ids: MessageIdGenerator) -> Self {
        Self { clock, message_ids }
    }

    /// Replaces the clock used for `Date` and message identifiers.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.message_ids = self.message_ids.with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    /// Replaces the random source used for message identifiers.
    #[must_use]
    pub fn with_entropy(mut self, entropy: Arc<dyn Entropy>) -> Self {
        self.message_ids = self.message_ids.with_entropy(entropy);
        self
    }

    /// Replaces the host name used for message identifiers.
    #[must_use]
    pub fn with_hostname(mut self, hostname: Arc<dyn Hostname>) -> Self {
        self.message_ids = self.message_ids.with_hostname(hostname);
        self
    }

    /// Serializes a message.
    ///
    /// A `Date` header with the current time and a `Message-Id` header are
    /// added to the message when missing, so serializing again yields the
    /// same identifiers. A `Message-Id` with an empty value is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if a generated header fails validation.
    pub fn serialize(&self, message: &mut Message) -> Result<Vec<u8>> {
        let body = normalize_line_endings(message.body(), "\r\n");
        let body = encode_base64_wrapped(body.as_bytes());

        if message.find_header("Date", 0).is_none() {
            let pos = message.add_header("Date", self.clock.now())?;
            tracing::debug!(pos, "added Date header");
        }
        match message.find_header("Message-Id", 0) {
            None => {
                let id = self.message_ids.generate();
                tracing::debug!(message_id = %id, "added Message-Id header");
                message.add_header("Message-Id", id)?;
            }
            Some(pos) if is_blank_id(&message.header(pos)?.value) => {
                let id = self.message_ids.generate();
                tracing::debug!(pos, message_id = %id, "replaced empty Message-Id header");
                message.set_header(pos, "Message-Id", id)?;
            }
            Some(_) => {}
        }

        let fields = combine(&message.headers().fields());
        let mut out = String::with_capacity(body.len() + 512);
        for field in &fields {
            out.push_str(&encode_field(field));
        }
        out.push_str(MIME_PREAMBLE);
        out.push_str("\r\n");
        out.push_str(&body);

        tracing::debug!(
            headers = fields.len(),
            bytes = out.len(),
            "serialized message"
        );
        Ok(out.into_bytes())
    }
}

/// An identifier with nothing but whitespace and angle brackets.
fn is_blank_id(value: &HeaderValue) -> bool {
    let blank = |id: &str| {
        id.trim_matches(|c: char| c.is_whitespace() || c == '<' || c == '>')
            .is_empty()
    };
    match value {
        HeaderValue::MultiText(ids) => ids.iter().all(|id| blank(id)),
        other => blank(&other.as_text()),
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), MessageIdGenerator::default())
    }
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("message_ids", &self.message_ids)
            .finish_non_exhaustive()
    }
}
