//! Header name canonicalization.

/// Canonicalizes a header name to `Title-Case-With-Hyphens`.
///
/// The name is lowercased, every word separated by `-` or whitespace gets an
/// uppercase first letter, and spaces become `-`. Only ASCII letters change case.
///
/// ```
/// use quillmail_message::canonicalize;
///
/// assert_eq!(canonicalize("x-MAILER"), "X-Mailer");
/// assert_eq!(canonicalize("message-id"), "Message-Id");
/// ```
#[must_use]
pub fn canonicalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;

    for ch in name.chars() {
        match ch {
            '-' | ' ' => {
                out.push('-');
                word_start = true;
            }
            '\t' | '\r' | '\n' | '\x0b' | '\x0c' => {
                out.push(ch);
                word_start = true;
            }
            _ if word_start => {
                out.push(ch.to_ascii_uppercase());
                word_start = false;
            }
            _ => out.push(ch.to_ascii_lowercase()),
        }
    }

    out
}
