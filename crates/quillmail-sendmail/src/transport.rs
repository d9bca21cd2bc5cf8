//! Process-based transport.

use crate::config::SendmailConfig;
use crate::error::{Error, Result};
use quillmail_message::{Envelope, Transport};
use std::io::Write;
use std::process::{Command, Stdio};

/// Submits messages by piping them into a sendmail-compatible program.
///
/// The program is run directly, without a shell. Each submission starts a
/// new process and blocks until it exits.
#[derive(Debug, Clone, Default)]
pub struct SendmailTransport {
    config: SendmailConfig,
}

impl SendmailTransport {
    /// Creates a transport with the given configuration.
    #[must_use]
    pub const fn new(config: SendmailConfig) -> Self {
        Self { config }
    }

    /// Creates a transport configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SendmailConfig::from_env())
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SendmailConfig {
        &self.config
    }

    fn command(&self, envelope: &Envelope) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.args);
        if let Some(sender) = &envelope.sender {
            command.arg(format!("-f{sender}"));
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        command
    }

    /// Runs the program and writes `message` to its standard input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if the program cannot be started,
    /// [`Error::ExitStatus`] if it exits unsuccessfully, and [`Error::Io`]
    /// if the message could not be written to a program that then succeeded.
    pub fn send_raw(&self, envelope: &Envelope, message: &[u8]) -> Result<()> {
        tracing::info!(
            program = %self.config.program.display(),
            sender = envelope.sender.as_deref().unwrap_or(""),
            bytes = message.len(),
            "Submitting message to transport agent"
        );

        let mut child = self.command(envelope).spawn().map_err(|source| Error::Spawn {
            program: self.config.program.clone(),
            source,
        })?;

        // Dropping stdin closes the pipe so the agent sees end of input.
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(message));

        let status = child.wait()?;
        if !status.success() {
            tracing::error!(code = ?status.code(), "Transport agent failed");
            return Err(Error::ExitStatus {
                code: status.code(),
            });
        }

        written?;
        tracing::debug!("Transport agent accepted message");
        Ok(())
    }
}

impl Transport for SendmailTransport {
    type Error = Error;

    fn submit(&self, envelope: &Envelope, message: &[u8]) -> Result<()> {
        self.send_raw(envelope, message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_command_without_sender() {
        let transport = SendmailTransport::default();
        let command = transport.command(&Envelope::default());

        assert_eq!(command.get_program(), OsStr::new("/usr/sbin/sendmail"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, vec![OsStr::new("-t"), OsStr::new("-i")]);
    }

    #[test]
    fn test_command_with_sender_is_single_argument() {
        let transport = SendmailTransport::new(SendmailConfig::new("sendmail"));
        let envelope = Envelope {
            sender: Some("bounce@example.com; rm -rf /".to_string()),
        };
        let command = transport.command(&envelope);

        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, vec![OsStr::new("-fbounce@example.com; rm -rf /")]);
    }

    #[test]
    fn test_spawn_failure() {
        let transport =
            SendmailTransport::new(SendmailConfig::new("/nonexistent/quillmail/sendmail"));
        let err = transport.send_raw(&Envelope::default(), b"x").unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
