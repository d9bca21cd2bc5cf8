//! Merging of repeated header fields.

use crate::header::HeaderField;
use crate::value::HeaderValue;

/// Header names whose occurrences are merged into one field before encoding.
pub const COMBINABLE: [&str; 11] = [
    "Date",
    "Subject",
    "To",
    "Cc",
    "Bcc",
    "From",
    "Sender",
    "Reply-To",
    "Message-Id",
    "In-Reply-To",
    "References",
];

/// A header field with every value collected for its name.
///
/// Fields that were not combined carry exactly one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedField {
    /// Canonicalized header name.
    pub name: String,
    /// Values in insertion order.
    pub values: Vec<HeaderValue>,
}

/// Returns true if occurrences of the canonical `name` are merged.
#[must_use]
pub fn is_combinable(name: &str) -> bool {
    COMBINABLE.contains(&name)
}

/// Collapses repeated combinable fields.
///
/// Every occurrence of a combinable name, wherever it appears, is merged into
/// one entry at the position of its first occurrence. All other fields keep
/// their relative order.
#[must_use]
pub fn combine(fields: &[HeaderField]) -> Vec<CombinedField> {
    let mut taken = vec![false; fields.len()];
    let mut combined = Vec::with_capacity(fields.len());

    for (i, field) in fields.iter().enumerate() {
        if taken[i] {
            continue;
        }
        taken[i] = true;

        if !is_combinable(&field.name) {
            combined.push(CombinedField {
                name: field.name.clone(),
                values: vec![field.value.clone()],
            });
            continue;
        }

        let mut values = vec![field.value.clone()];
        for (j, other) in fields.iter().enumerate().skip(i + 1) {
            if !taken[j] && other.name == field.name {
                taken[j] = true;
                values.push(other.value.clone());
            }
        }

        combined.push(CombinedField {
            name: field.name.clone(),
            values,
        });
    }

    combined
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::similar_names)]
mod tests {
    use super::*;

    fn field(name: &str, value: &str) -> HeaderField {
        HeaderField::new(name, value)
    }

    fn group(name: &str, values: &[&str]) -> CombinedField {
        CombinedField {
            name: name.to_string(),
            values: values.iter().map(|v| HeaderValue::from(*v)).collect(),
        }
    }

    #[test]
    fn test_combine_merges_non_adjacent() {
        let fields = [field("Subject", "a"), field("To", "x"), field("Subject", "b")];
        assert_eq!(
            combine(&fields),
            vec![group("Subject", &["a", "b"]), group("To", &["x"])]
        );
    }

    #[test]
    fn test_combine_keeps_other_fields_repeated() {
        let fields = [
            field("Received", "one"),
            field("To", "a@x"),
            field("Received", "two"),
            field("To", "b@x"),
            field("X-Tag", "t"),
        ];
        assert_eq!(
            combine(&fields),
            vec![
                group("Received", &["one"]),
                group("To", &["a@x", "b@x"]),
                group("Received", &["two"]),
                group("X-Tag", &["t"]),
            ]
        );
    }

    #[test]
    fn test_combine_empty() {
        assert!(combine(&[]).is_empty());
    }

    #[test]
    fn test_is_combinable() {
        for name in COMBINABLE {
            assert!(is_combinable(name));
        }
        assert!(!is_combinable("Return-Path"));
        assert!(!is_combinable("X-Mailer"));
        assert!(!is_combinable("subject"));
    }
}
