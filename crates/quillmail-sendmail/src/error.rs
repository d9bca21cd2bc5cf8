//! Error types for sendmail submission.

use std::io;
use std::path::PathBuf;

/// Result type alias for sendmail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Sendmail error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport program could not be started.
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        /// Program that failed to start.
        program: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// I/O error while handing the message over.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The program finished unsuccessfully.
    #[error("Transport agent exited with {}", describe(.code))]
    ExitStatus {
        /// Exit code, or `None` when terminated by a signal.
        code: Option<i32>,
    },
}

impl Error {
    /// Returns the exit code if the agent ran and reported failure.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitStatus { code } => *code,
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn describe(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |code| format!("status {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ExitStatus { code: Some(75) }.to_string(),
            "Transport agent exited with status 75"
        );
        assert_eq!(
            Error::ExitStatus { code: None }.to_string(),
            "Transport agent exited with a signal"
        );
        let err = Error::Spawn {
            program: PathBuf::from("/usr/sbin/sendmail"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("Failed to start /usr/sbin/sendmail"));
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(Error::ExitStatus { code: Some(1) }.exit_code(), Some(1));
        assert_eq!(Error::Io(io::Error::other("x")).exit_code(), None);
    }
}
