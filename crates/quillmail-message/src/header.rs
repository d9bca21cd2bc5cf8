//! Ordered header field storage.

use crate::error::{Error, Result};
use crate::name::canonicalize;
use crate::validate::{validate_header, validate_header_bytes};
use crate::value::HeaderValue;

/// A single header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    /// Canonicalized header name.
    pub name: String,
    /// Header value.
    pub value: HeaderValue,
}

impl HeaderField {
    /// Creates a field, canonicalizing the name.
    ///
    /// No validation is applied; use [`HeaderStore::add`] for checked insertion.
    #[must_use]
    pub fn new(name: &str, value: impl Into<HeaderValue>) -> Self {
        Self {
            name: canonicalize(name),
            value: value.into(),
        }
    }
}

/// Ordered collection of header fields addressed by position.
///
/// Positions are stable: removing a field leaves an empty slot, so the
/// positions of later fields never shift and a removed slot is not reused
/// by [`add`](Self::add). Duplicate names are kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    slots: Vec<Option<HeaderField>>,
}

impl HeaderStore {
    /// Creates a new empty header store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the field at a position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the position was never filled or has been removed.
    pub fn get(&self, pos: usize) -> Result<&HeaderField> {
        self.slots
            .get(pos)
            .and_then(Option::as_ref)
            .ok_or(Error::OutOfRange(pos))
    }

    /// Replaces the field at a position.
    ///
    /// A removed slot may be filled again.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad content, or [`Error::OutOfRange`]
    /// if the position is past the end of the store.
    pub fn set(&mut self, pos: usize, name: &str, value: impl Into<HeaderValue>) -> Result<()> {
        let value = value.into();
        validate_header(name, &value)?;

        let slot = self.slots.get_mut(pos).ok_or(Error::OutOfRange(pos))?;
        *slot = Some(HeaderField {
            name: canonicalize(name),
            value,
        });
        Ok(())
    }

    /// Appends a field and returns its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeaderInjection`] if the name or value contains CR or LF.
    pub fn add(&mut self, name: &str, value: impl Into<HeaderValue>) -> Result<usize> {
        let value = value.into();
        validate_header(name, &value)?;

        self.slots.push(Some(HeaderField {
            name: canonicalize(name),
            value,
        }));
        Ok(self.slots.len() - 1)
    }

    /// Appends a text field given as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] for non-UTF-8 input and
    /// [`Error::HeaderInjection`] for CR or LF.
    pub fn add_bytes(&mut self, name: &[u8], value: &[u8]) -> Result<usize> {
        let (name, value) = validate_header_bytes(name, value)?;
        self.add(name, value)
    }

    /// Removes the field at a position, leaving an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if there is no field at the position.
    pub fn remove(&mut self, pos: usize) -> Result<HeaderField> {
        self.slots
            .get_mut(pos)
            .and_then(Option::take)
            .ok_or(Error::OutOfRange(pos))
    }

    /// Finds the first field named `name` at or after position `from`.
    #[must_use]
    pub fn find(&self, name: &str, from: usize) -> Option<usize> {
        let name = canonicalize(name);
        self.slots
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(pos, slot)| match slot {
                Some(field) if field.name == name => Some(pos),
                _ => None,
            })
    }

    /// Returns the value of the first field named `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&HeaderValue> {
        self.find(name, 0)
            .and_then(|pos| self.get(pos).ok())
            .map(|field| &field.value)
    }

    /// Returns the values of every field named `name`, in order.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<&HeaderValue> {
        let mut values = Vec::new();
        let mut pos = 0;
        while let Some(found) = self.find(name, pos) {
            if let Ok(field) = self.get(found) {
                values.push(&field.value);
            }
            pos = found + 1;
        }
        values
    }

    /// Returns an iterator over the live fields and their positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &HeaderField)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(pos, slot)| slot.as_ref().map(|field| (pos, field)))
    }

    /// Returns the live fields as a compacted sequence.
    #[must_use]
    pub fn fields(&self) -> Vec<HeaderField> {
        self.iter().map(|(_, field)| field.clone()).collect()
    }

    /// Returns the number of live fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if the store has no live fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Removes every field and resets positions.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::needless_collect,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use crate::address::Address;

    #[test]
    fn test_store_new() {
        let store = HeaderStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_add_get() {
        let mut store = HeaderStore::new();
        let pos = store.add("subject", "Hello").unwrap();
        assert_eq!(pos, 0);

        let field = store.get(pos).unwrap();
        assert_eq!(field.name, "Subject");
        assert_eq!(field.value, HeaderValue::from("Hello"));
    }

    #[test]
    fn test_add_returns_sequential_positions() {
        let mut store = HeaderStore::new();
        assert_eq!(store.add("To", "a@x").unwrap(), 0);
        assert_eq!(store.add("To", "b@x").unwrap(), 1);
        store.remove(1).unwrap();
        assert_eq!(store.add("Cc", "c@x").unwrap(), 2);
    }

    #[test]
    fn test_add_rejects_injection() {
        let mut store = HeaderStore::new();
        assert!(matches!(
            store.add("Subject", "hi\r\nBcc: evil@example.com"),
            Err(Error::HeaderInjection(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_bytes_rejects_invalid_utf8() {
        let mut store = HeaderStore::new();
        assert!(matches!(
            store.add_bytes(b"Subject", b"\xff"),
            Err(Error::InvalidEncoding(_))
        ));
        assert_eq!(store.add_bytes(b"x-tag", b"ok").unwrap(), 0);
        assert_eq!(store.get(0).unwrap().name, "X-Tag");
    }

    #[test]
    fn test_remove_leaves_hole() {
        let mut store = HeaderStore::new();
        store.add("A", "1").unwrap();
        store.add("B", "2").unwrap();
        store.add("C", "3").unwrap();

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name, "B");
        assert!(matches!(store.get(1), Err(Error::OutOfRange(1))));
        assert_eq!(store.get(2).unwrap().name, "C");
        assert_eq!(store.len(), 2);
        assert!(matches!(store.remove(1), Err(Error::OutOfRange(1))));
    }

    #[test]
    fn test_get_out_of_range() {
        let store = HeaderStore::new();
        assert!(matches!(store.get(5), Err(Error::OutOfRange(5))));
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = HeaderStore::new();
        store.add("Subject", "old").unwrap();
        store.add("To", "a@x").unwrap();

        store.set(0, "x-priority", "1").unwrap();
        assert_eq!(store.get(0).unwrap().name, "X-Priority");
        assert_eq!(store.get(1).unwrap().name, "To");
    }

    #[test]
    fn test_set_revives_removed_slot() {
        let mut store = HeaderStore::new();
        store.add("Subject", "old").unwrap();
        store.remove(0).unwrap();
        store.set(0, "Subject", "new").unwrap();
        assert_eq!(store.get(0).unwrap().value, HeaderValue::from("new"));
    }

    #[test]
    fn test_set_past_end_fails() {
        let mut store = HeaderStore::new();
        assert!(matches!(store.set(3, "Subject", "x"), Err(Error::OutOfRange(3))));
    }

    #[test]
    fn test_set_validates() {
        let mut store = HeaderStore::new();
        store.add("Subject", "old").unwrap();
        assert!(store.set(0, "Subject", "new\n").is_err());
        assert_eq!(store.get(0).unwrap().value, HeaderValue::from("old"));
    }

    #[test]
    fn test_find() {
        let mut store = HeaderStore::new();
        store.add("To", "a@x").unwrap();
        store.add("Subject", "s").unwrap();
        store.add("to", "b@x").unwrap();

        assert_eq!(store.find("TO", 0), Some(0));
        assert_eq!(store.find("to", 1), Some(2));
        assert_eq!(store.find("to", 3), None);
        assert_eq!(store.find("Cc", 0), None);

        store.remove(0).unwrap();
        assert_eq!(store.find("to", 0), Some(2));
    }

    #[test]
    fn test_value_and_values() {
        let mut store = HeaderStore::new();
        store.add("To", Address::with_name("A", "a@x")).unwrap();
        store.add("Subject", "s").unwrap();
        store.add("To", "b@x").unwrap();

        assert_eq!(
            store.value("to"),
            Some(&HeaderValue::from(Address::with_name("A", "a@x")))
        );
        assert_eq!(store.value("cc"), None);

        let values = store.values("To");
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], &HeaderValue::from("b@x"));
        assert!(store.values("Cc").is_empty());
    }

    #[test]
    fn test_iter_skips_removed() {
        let mut store = HeaderStore::new();
        store.add("A", "1").unwrap();
        store.add("B", "2").unwrap();
        store.add("C", "3").unwrap();
        store.remove(0).unwrap();

        let positions: Vec<usize> = store.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions, vec![1, 2]);

        let names: Vec<String> = store.fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_clear() {
        let mut store = HeaderStore::new();
        store.add("A", "1").unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.add("B", "2").unwrap(), 0);
    }
}
