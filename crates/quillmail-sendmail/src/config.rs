//! Transport agent configuration.

use std::path::PathBuf;

/// Environment variable holding a sendmail command line.
pub const ENV_VAR: &str = "QUILLMAIL_SENDMAIL";

/// Default transport agent program.
pub const DEFAULT_PROGRAM: &str = "/usr/sbin/sendmail";

/// How to invoke the sendmail-compatible program.
///
/// The message is written to the program's standard input. When the message
/// has an envelope sender, `-f<sender>` is appended after `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SendmailConfig {
    /// Program to run.
    pub program: PathBuf,
    /// Arguments passed before the envelope sender.
    pub args: Vec<String>,
}

impl SendmailConfig {
    /// Creates a configuration running `program` without arguments.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parses a whitespace separated command line such as `sendmail -t -i`.
    ///
    /// Returns `None` for a blank command line. No shell quoting is applied.
    #[must_use]
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut words = command_line.split_whitespace();
        let program = words.next()?;
        Some(Self {
            program: PathBuf::from(program),
            args: words.map(str::to_string).collect(),
        })
    }

    /// Reads the command line from `QUILLMAIL_SENDMAIL`, falling back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(ENV_VAR)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Replaces the program.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Default for SendmailConfig {
    /// `/usr/sbin/sendmail -t -i`: recipients from headers, lone dots kept.
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM).with_arg("-t").with_arg("-i")
    }
}
