//! Header and body content checks.
//!
//! Every header insertion passes through here before the name is
//! canonicalized, so injection payloads never enter a [`HeaderStore`](crate::HeaderStore).

use crate::error::{Error, Result};
use crate::value::HeaderValue;

/// Rejects a header whose name or value contains CR or LF.
///
/// # Errors
///
/// Returns [`Error::HeaderInjection`] if any part of the header contains a line break.
pub fn validate_header(name: &str, value: &HeaderValue) -> Result<()> {
    let injected = contains_line_break(name)
        || value
            .leaves()
            .iter()
            .any(|leaf| contains_line_break(leaf));

    if injected {
        tracing::warn!(header = %name.escape_debug(), "rejected header containing CR/LF");
        return Err(Error::HeaderInjection(name.escape_debug().to_string()));
    }

    Ok(())
}

/// Checks raw header bytes, returning the name and value as text.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if either part is not UTF-8 and
/// [`Error::HeaderInjection`] if either contains CR or LF.
pub fn validate_header_bytes<'a>(name: &'a [u8], value: &'a [u8]) -> Result<(&'a str, &'a str)> {
    let name = std::str::from_utf8(name).map_err(|_| Error::InvalidEncoding("header"))?;
    let value = std::str::from_utf8(value).map_err(|_| Error::InvalidEncoding("header"))?;

    if contains_line_break(name) || contains_line_break(value) {
        tracing::warn!(header = %name.escape_debug(), "rejected header containing CR/LF");
        return Err(Error::HeaderInjection(name.escape_debug().to_string()));
    }

    Ok((name, value))
}

/// Checks that a body is UTF-8. Line breaks are allowed.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if the body is not UTF-8.
pub fn validate_body(body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body).map_err(|_| Error::InvalidEncoding("body"))
}

fn contains_line_break(text: &str) -> bool {
    text.contains(['\r', '\n'])
}
