//! Handing finished messages to a mail transport agent.

use crate::error::{Error, Result};
use crate::message::Message;
use crate::serialize::Serializer;

/// Envelope information passed to the transport alongside the message bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    /// Envelope sender (bounce address), taken from `Return-Path`.
    pub sender: Option<String>,
}

impl Envelope {
    /// Builds the envelope for a message.
    #[must_use]
    pub fn for_message(message: &Message) -> Self {
        Self {
            sender: message.return_path(),
        }
    }
}

/// A mail transport agent that accepts serialized messages.
///
/// Submission is a single blocking call. Retries and timeouts belong to the
/// implementation, not to the caller.
pub trait Transport {
    /// Error reported when the agent rejects or fails to accept a message.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submits one serialized message.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent did not accept the message.
    fn submit(&self, envelope: &Envelope, message: &[u8]) -> std::result::Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn submit(&self, envelope: &Envelope, message: &[u8]) -> std::result::Result<(), Self::Error> {
        (**self).submit(envelope, message)
    }
}

/// Serializes messages and submits them to a transport.
#[derive(Debug, Clone)]
pub struct Mailer<T> {
    serializer: Serializer,
    transport: T,
}

impl<T: Transport> Mailer<T> {
    /// Creates a mailer with the default serializer.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            serializer: Serializer::default(),
            transport,
        }
    }

    /// Replaces the serializer.
    #[must_use]
    pub fn with_serializer(mut self, serializer: Serializer) -> Self {
        self.serializer = serializer;
        self
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Serializes `message` and submits it.
    ///
    /// The envelope sender comes from the `Return-Path` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportFailure`] if the transport rejects the
    /// message, or a serialization error.
    pub fn send(&self, message: &mut Message) -> Result<()> {
        let bytes = self.serializer.serialize(message)?;
        let envelope = Envelope::for_message(message);

        tracing::debug!(
            sender = envelope.sender.as_deref().unwrap_or(""),
            bytes = bytes.len(),
            "submitting message"
        );
        self.transport.submit(&envelope, &bytes).map_err(|e| {
            tracing::error!(error = %e, "transport rejected message");
            Error::TransportFailure(Box::new(e))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::similar_names)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        submitted: Mutex<Vec<(Envelope, Vec<u8>)>>,
    }

    impl Transport for Recording {
        type Error = io::Error;

        fn submit(&self, envelope: &Envelope, message: &[u8]) -> io::Result<()> {
            self.submitted
                .lock()
                .unwrap()
                .push((envelope.clone(), message.to_vec()));
            Ok(())
        }
    }

    struct Rejecting;

    impl Transport for Rejecting {
        type Error = io::Error;

        fn submit(&self, _envelope: &Envelope, _message: &[u8]) -> io::Result<()> {
            Err(io::Error::other("exit status 75"))
        }
    }

    #[test]
    fn test_envelope_for_message() {
        let mut message = Message::new();
        assert_eq!(Envelope::for_message(&message).sender, None);

        message.add_header("Return-Path", "<bounce@example.com>").unwrap();
        assert_eq!(
            Envelope::for_message(&message).sender.as_deref(),
            Some("bounce@example.com")
        );
    }

    #[test]
    fn test_send_submits_serialized_message() {
        let mut message = Message::new();
        message.add_header("Return-Path", "<bounce@example.com>").unwrap();
        message.add_header("Subject", "hi").unwrap();
        message.set_body("body");

        let transport = Recording::default();
        let mailer = Mailer::new(&transport);
        mailer.send(&mut message).unwrap();

        let submitted = transport.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let (envelope, bytes) = &submitted[0];
        assert_eq!(envelope.sender.as_deref(), Some("bounce@example.com"));

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("Return-Path: <bounce@example.com>\r\nSubject: hi\r\n"));
        assert!(message.find_header("Message-Id", 0).is_some());
    }

    #[test]
    fn test_send_reports_transport_failure() {
        let mut message = Message::new();
        let err = Mailer::new(Rejecting).send(&mut message).unwrap_err();

        assert!(matches!(err, Error::TransportFailure(_)));
        assert!(err.to_string().contains("exit status 75"));
    }
}
