//! # quillmail-sendmail
//!
//! Delivers [`quillmail_message::Message`]s through a sendmail-compatible
//! mail transport agent.
//!
//! The serialized message is written to the agent's standard input. The
//! envelope sender, taken from the message's `Return-Path` header, is passed
//! as `-f<address>`. A non-zero exit status is reported as a failure.
//!
//! ## Example
//!
//! ```no_run
//! use quillmail_message::{Mailer, Message};
//! use quillmail_sendmail::{SendmailConfig, SendmailTransport};
//!
//! let transport = SendmailTransport::new(SendmailConfig::default());
//! let mailer = Mailer::new(transport);
//!
//! let mut message = Message::new();
//! message.add_header("Return-Path", "<bounces@example.com>")?;
//! message.add_header("From", "app@example.com")?;
//! message.add_header("To", "user@example.org")?;
//! message.add_header("Subject", "Welcome")?;
//! message.set_body("Thanks for signing up.");
//!
//! mailer.send(&mut message)?;
//! # Ok::<(), quillmail_message::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod transport;

pub use config::{DEFAULT_PROGRAM, ENV_VAR, SendmailConfig};
pub use error::{Error, Result};
pub use transport::SendmailTransport;
