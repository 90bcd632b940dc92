/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Ordered collection of fields.
//!
//! A [`FieldMap`] backs each section (header, body, trailer) of a message.
//! Fields keep their insertion order so re-encoding reproduces the input.

use crate::tag_value::{SOH, TagValue};
use fixroute_core::error::FieldError;
use fixroute_core::field::Tag;
use smallvec::SmallVec;
use std::str::FromStr;

/// Ordered set of [`TagValue`] fields.
///
/// The lifetime follows the fields: a map filled by the decoder borrows the
/// decoded buffer, a map filled by the setters owns its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap<'a> {
    fields: SmallVec<[TagValue<'a>; 16]>,
}

impl<'a> FieldMap<'a> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the map holds no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over the fields in order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TagValue<'a>> {
        self.fields.iter()
    }

    /// Returns true if a field with `tag` is present.
    #[must_use]
    pub fn has(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    /// Returns the first field with `tag`.
    #[must_use]
    pub fn get(&self, tag: Tag) -> Option<&TagValue<'a>> {
        self.fields.iter().find(|f| f.tag() == tag)
    }

    /// Gets a field's raw value bytes.
    ///
    /// # Errors
    /// Returns `FieldError::FieldNotFound` if the tag is absent.
    pub fn get_bytes(&self, tag: Tag) -> Result<&[u8], FieldError> {
        self.get(tag)
            .map(TagValue::value)
            .ok_or(FieldError::FieldNotFound { tag: tag.value() })
    }

    /// Gets a field's value as a string.
    ///
    /// # Errors
    /// Returns `FieldError::FieldNotFound` if the tag is absent and
    /// `FieldError::InvalidUtf8` if the value is not UTF-8.
    pub fn get_str(&self, tag: Tag) -> Result<&str, FieldError> {
        self.get(tag)
            .ok_or(FieldError::FieldNotFound { tag: tag.value() })?
            .value_str()
    }

    /// Gets a field's value parsed as the specified type.
    ///
    /// # Errors
    /// Returns `FieldError::FieldNotFound` if the tag is absent and
    /// `FieldError::InvalidValue` if the value cannot be parsed.
    pub fn get_field_as<T: FromStr>(&self, tag: Tag) -> Result<T, FieldError> {
        let s = self.get_str(tag)?;
        s.parse().map_err(|_| FieldError::InvalidValue {
            tag: tag.value(),
            reason: format!("failed to parse '{}' as {}", s, std::any::type_name::<T>()),
        })
    }

    /// Sets a field, replacing the first field with the same tag or
    /// appending it.
    pub fn set_field(&mut self, field: TagValue<'a>) -> &mut Self {
        match self.fields.iter_mut().find(|f| f.tag() == field.tag()) {
            Some(slot) => *slot = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Appends a field without replacing existing ones.
    ///
    /// Used by the decoder, where repeated tags (repeating groups) must
    /// keep their wire order.
    pub fn push(&mut self, field: TagValue<'a>) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// Sets a field from raw value bytes.
    pub fn set_bytes(&mut self, tag: Tag, value: impl AsRef<[u8]>) -> &mut Self {
        self.set_field(TagValue::new(tag, value))
    }

    /// Sets a string field.
    pub fn set_str(&mut self, tag: Tag, value: &str) -> &mut Self {
        self.set_bytes(tag, value.as_bytes())
    }

    /// Sets an integer field.
    pub fn set_int(&mut self, tag: Tag, value: i64) -> &mut Self {
        let mut buf = itoa::Buffer::new();
        let formatted = buf.format(value);
        self.set_bytes(tag, formatted.as_bytes())
    }

    /// Removes and returns the first field with `tag`.
    pub fn remove(&mut self, tag: Tag) -> Option<TagValue<'a>> {
        let idx = self.fields.iter().position(|f| f.tag() == tag)?;
        Some(self.fields.remove(idx))
    }

    /// Removes all fields.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns the byte sum of all fields in wire form, delimiters included.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total_excluding(&[])
    }

    /// Returns the byte count of all fields in wire form, delimiters included.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length_excluding(&[])
    }

    /// Like [`total`](Self::total), skipping fields whose tag is in `skip`.
    #[must_use]
    pub fn total_excluding(&self, skip: &[Tag]) -> u32 {
        self.fields
            .iter()
            .filter(|f| !skip.contains(&f.tag()))
            .fold(0u32, |acc, f| acc.wrapping_add(wire_total(f)))
    }

    /// Like [`length`](Self::length), skipping fields whose tag is in `skip`.
    #[must_use]
    pub fn length_excluding(&self, skip: &[Tag]) -> usize {
        self.fields
            .iter()
            .filter(|f| !skip.contains(&f.tag()))
            .map(wire_length)
            .sum()
    }

    /// Copies every field into an owned map.
    #[must_use]
    pub fn into_owned(self) -> FieldMap<'static> {
        FieldMap {
            fields: self.fields.into_iter().map(TagValue::into_owned).collect(),
        }
    }
}

/// Byte sum of a field as framed on the wire.
#[inline]
pub(crate) fn wire_total(field: &TagValue<'_>) -> u32 {
    if field.has_delimiter() {
        field.total()
    } else {
        field.total().wrapping_add(u32::from(SOH))
    }
}

/// Byte count of a field as framed on the wire.
#[inline]
pub(crate) fn wire_length(field: &TagValue<'_>) -> usize {
    field.length() + usize::from(!field.has_delimiter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixroute_core::field::tags;

    #[test]
    fn test_set_and_get() {
        let mut map = FieldMap::new();
        map.set_str(tags::SENDER_COMP_ID, "SENDER")
            .set_int(tags::MSG_SEQ_NUM, 42);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get_str(tags::SENDER_COMP_ID).unwrap(), "SENDER");
        assert_eq!(map.get_field_as::<u64>(tags::MSG_SEQ_NUM).unwrap(), 42);
        assert_eq!(map.get_bytes(tags::MSG_SEQ_NUM).unwrap(), b"42");
        assert!(map.has(tags::SENDER_COMP_ID));
        assert!(!map.has(tags::TARGET_COMP_ID));
    }

    #[test]
    fn test_get_missing_field() {
        let map = FieldMap::new();
        assert_eq!(
            map.get_str(tags::BEGIN_STRING).unwrap_err(),
            FieldError::FieldNotFound { tag: 8 }
        );
        assert_eq!(
            map.get_bytes(tags::TARGET_COMP_ID).unwrap_err(),
            FieldError::FieldNotFound { tag: 56 }
        );
    }

    #[test]
    fn test_get_field_as_invalid() {
        let mut map = FieldMap::new();
        map.set_str(tags::MSG_SEQ_NUM, "abc");
        assert!(matches!(
            map.get_field_as::<u64>(tags::MSG_SEQ_NUM).unwrap_err(),
            FieldError::InvalidValue { tag: 34, .. }
        ));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut map = FieldMap::new();
        map.set_str(tags::BEGIN_STRING, "FIX.4.2")
            .set_str(tags::MSG_TYPE, "D")
            .set_str(tags::BEGIN_STRING, "FIX.4.4");

        assert_eq!(map.len(), 2);
        let order: Vec<Tag> = map.iter().map(TagValue::tag).collect();
        assert_eq!(order, vec![tags::BEGIN_STRING, tags::MSG_TYPE]);
        assert_eq!(map.get_str(tags::BEGIN_STRING).unwrap(), "FIX.4.4");
    }

    #[test]
    fn test_push_keeps_duplicates() {
        let mut map = FieldMap::new();
        map.push(TagValue::new(Tag::new(448), "A"))
            .push(TagValue::new(Tag::new(448), "B"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_str(Tag::new(448)).unwrap(), "A");
    }

    #[test]
    fn test_remove() {
        let mut map = FieldMap::new();
        map.set_str(tags::TEXT, "hello");
        let removed = map.remove(tags::TEXT).unwrap();
        assert_eq!(removed.value(), b"hello");
        assert!(map.is_empty());
        assert!(map.remove(tags::TEXT).is_none());
    }

    #[test]
    fn test_total_and_length_count_delimiters() {
        let raw = b"35=A\x01";
        let mut parsed = FieldMap::new();
        parsed.push(TagValue::parse(raw).unwrap());

        let mut built = FieldMap::new();
        built.set_str(tags::MSG_TYPE, "A");

        assert_eq!(parsed.length(), 5);
        assert_eq!(built.length(), 5);
        assert_eq!(parsed.total(), built.total());
        assert_eq!(parsed.total(), 51 + 53 + 61 + 65 + 1);
    }

    #[test]
    fn test_excluding() {
        let mut map = FieldMap::new();
        map.set_str(tags::BEGIN_STRING, "FIX.4.2")
            .set_str(tags::MSG_TYPE, "0");
        assert_eq!(map.length_excluding(&[tags::BEGIN_STRING]), 5);
        assert_eq!(map.length(), 5 + 10);
    }

    #[test]
    fn test_into_owned() {
        let buf = b"58=text\x01".to_vec();
        let mut map = FieldMap::new();
        map.push(TagValue::parse(&buf).unwrap());
        let owned = map.into_owned();
        drop(buf);
        assert_eq!(owned.get_str(tags::TEXT).unwrap(), "text");
    }
}
