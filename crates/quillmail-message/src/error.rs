//! Error types for message operations.

/// Result type alias for message operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Header or body content is not valid UTF-8.
    #[error("Non-UTF-8 character in mail {0}")]
    InvalidEncoding(&'static str),

    /// CR or LF found inside a header name or value.
    #[error("CR/LF in mail header: {0}")]
    HeaderInjection(String),

    /// No header exists at the position.
    #[error("No header at position {0}")]
    OutOfRange(usize),

    /// Imported header line that cannot be split into name and value.
    #[error("Malformed header line: {0:?}")]
    MalformedHeader(String),

    /// The mail transport agent rejected the message.
    #[error("Transport failure: {0}")]
    TransportFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Returns true if the error was raised while validating header or body content.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_) | Self::HeaderInjection(_))
    }
}
