/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Single-field tag=value codec.
//!
//! [`TagValue`] is the lowest-level wire primitive: one `tag=value` field.
//! Parsed fields borrow the caller's buffer, so the lifetime `'a` ties every
//! parsed field to the bytes it was read from and the buffer cannot be
//! mutated or dropped while the field is alive.

use fixroute_core::error::FieldError;
use fixroute_core::field::Tag;
use memchr::memchr;
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Equals sign separator between tag and value.
pub const EQUALS: u8 = b'=';

/// One FIX field in wire form.
///
/// `bytes` holds the exact wire representation and `value` is the range of
/// the payload inside it. A parsed field includes its trailing delimiter in
/// `bytes`; a constructed field does not, the delimiter being the framer's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValue<'a> {
    tag: Tag,
    bytes: Cow<'a, [u8]>,
    value: Range<usize>,
}

impl TagValue<'static> {
    /// Builds a field from a tag and value, producing `"<tag>=<value>"`.
    ///
    /// No trailing delimiter is appended.
    ///
    /// # Arguments
    /// * `tag` - The field tag
    /// * `value` - The raw value bytes
    #[must_use]
    pub fn new(tag: Tag, value: impl AsRef<[u8]>) -> Self {
        let value = value.as_ref();
        let mut tag_buf = itoa::Buffer::new();
        let tag_str = tag_buf.format(tag.value());

        let mut bytes = Vec::with_capacity(tag_str.len() + 1 + value.len());
        bytes.extend_from_slice(tag_str.as_bytes());
        bytes.push(EQUALS);
        let start = bytes.len();
        bytes.extend_from_slice(value);
        let end = bytes.len();

        Self {
            tag,
            bytes: Cow::Owned(bytes),
            value: start..end,
        }
    }
}

impl<'a> TagValue<'a> {
    /// Parses one raw field, including its trailing delimiter byte.
    ///
    /// The returned field borrows `raw`: no bytes are copied.
    ///
    /// # Errors
    /// Returns `FieldError::NoSeparator` if `raw` has no `=`,
    /// `FieldError::NoTag` if `=` is the first byte, `FieldError::InvalidTag`
    /// if the tag is not a decimal number and `FieldError::Truncated` if the
    /// separator is the final byte.
    pub fn parse(raw: &'a [u8]) -> Result<Self, FieldError> {
        let sep = match find_separator(raw) {
            None => {
                return Err(FieldError::NoSeparator {
                    raw: lossy(raw),
                });
            }
            Some(0) => return Err(FieldError::NoTag { raw: lossy(raw) }),
            Some(sep) => sep,
        };

        let tag = parse_tag(&raw[..sep]).map_err(|reason| FieldError::InvalidTag {
            raw: lossy(raw),
            reason: reason.to_string(),
        })?;

        let n = raw.len();
        if sep == n - 1 {
            return Err(FieldError::Truncated { raw: lossy(raw) });
        }

        Ok(Self {
            tag: Tag::new(tag),
            bytes: Cow::Borrowed(raw),
            value: sep + 1..n - 1,
        })
    }

    /// Returns the field tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the value bytes, without tag, separator or delimiter.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.bytes[self.value.clone()]
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn value_str(&self) -> Result<&str, FieldError> {
        std::str::from_utf8(self.value()).map_err(|_| FieldError::InvalidUtf8 {
            tag: self.tag.value(),
        })
    }

    /// Returns the exact wire bytes of the field.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the arithmetic sum of the wire bytes.
    ///
    /// The sum wraps on overflow, which leaves the value modulo 256 (the FIX
    /// checksum) intact.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u32 {
        self.bytes
            .iter()
            .fold(0u32, |acc, &b| acc.wrapping_add(u32::from(b)))
    }

    /// Returns the number of wire bytes.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the wire bytes end with the field delimiter.
    ///
    /// True for parsed fields, false for constructed ones.
    #[inline]
    #[must_use]
    pub fn has_delimiter(&self) -> bool {
        self.value.end < self.bytes.len()
    }

    /// Returns true if the wire bytes are borrowed from a parse buffer.
    #[inline]
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.bytes, Cow::Borrowed(_))
    }

    /// Detaches the field from the parse buffer by copying its bytes.
    #[must_use]
    pub fn into_owned(self) -> TagValue<'static> {
        TagValue {
            tag: self.tag,
            bytes: Cow::Owned(self.bytes.into_owned()),
            value: self.value,
        }
    }
}

impl fmt::Display for TagValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

/// Locates the tag/value separator.
///
/// Most tags are at most four digits long, so positions 0 to 4 are probed
/// before falling back to a full scan. Position 0 is probed so that the result
/// always matches the first `=` in `raw`.
#[inline]
fn find_separator(raw: &[u8]) -> Option<usize> {
    if raw.len() >= 5 {
        if raw[0] == EQUALS {
            return Some(0);
        } else if raw[1] == EQUALS {
            return Some(1);
        } else if raw[2] == EQUALS {
            return Some(2);
        } else if raw[3] == EQUALS {
            return Some(3);
        } else if raw[4] == EQUALS {
            return Some(4);
        }
    }
    memchr(EQUALS, raw)
}

/// Parses a tag number from ASCII digits.
#[inline]
fn parse_tag(bytes: &[u8]) -> Result<u32, &'static str> {
    if bytes.is_empty() {
        return Err("empty tag");
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return Err("tag is not a decimal number");
        }
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(u32::from(b - b'0')))
            .ok_or("tag number out of range")?;
    }

    Ok(result)
}

fn lossy(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_wire_form() {
        let tv = TagValue::new(Tag::new(35), b"A");
        assert_eq!(tv.tag(), Tag::new(35));
        assert_eq!(tv.value(), b"A");
        assert_eq!(tv.as_bytes(), b"35=A");
        assert_eq!(tv.to_string(), "35=A");
        assert!(!tv.has_delimiter());
        assert!(!tv.is_borrowed());
    }

    #[test]
    fn test_new_empty_value() {
        let tv = TagValue::new(Tag::new(58), "");
        assert_eq!(tv.as_bytes(), b"58=");
        assert!(tv.value().is_empty());
    }

    #[test]
    fn test_parse_round_trip() {
        let inputs: [&[u8]; 5] = [
            b"8=FIX.4.2\x01",
            b"35=A\x01",
            b"49=SENDER\x01",
            b"12345=A\x01",
            b"58=\x01",
        ];
        for raw in inputs {
            let tv = TagValue::parse(raw).unwrap();
            assert_eq!(tv.as_bytes(), raw);
            assert_eq!(tv.to_string().as_bytes(), raw);
        }
    }

    #[test]
    fn test_parse_value_and_tag() {
        let tv = TagValue::parse(b"8=FIX.4.2\x01").unwrap();
        assert_eq!(tv.tag(), Tag::new(8));
        assert_eq!(tv.value_str().unwrap(), "FIX.4.2");
        assert!(tv.has_delimiter());
    }

    #[test]
    fn test_parse_is_zero_copy() {
        let buf = b"49=SENDER\x01".to_vec();
        let tv = TagValue::parse(&buf).unwrap();
        assert!(tv.is_borrowed());
        assert_eq!(tv.as_bytes().as_ptr(), buf.as_ptr());
        assert_eq!(tv.value().as_ptr(), buf[3..].as_ptr());
        assert_eq!(tv.value().len(), 6);
    }

    #[test]
    fn test_into_owned_detaches() {
        let buf = b"56=TARGET\x01".to_vec();
        let owned = TagValue::parse(&buf).unwrap().into_owned();
        drop(buf);
        assert!(!owned.is_borrowed());
        assert_eq!(owned.value(), b"TARGET");
        assert_eq!(owned.as_bytes(), b"56=TARGET\x01");
    }

    #[test]
    fn test_parse_no_separator() {
        let err = TagValue::parse(b"novalue").unwrap_err();
        assert!(matches!(err, FieldError::NoSeparator { ref raw } if raw == "novalue"));
        assert!(err.is_malformed());

        assert!(matches!(
            TagValue::parse(b"").unwrap_err(),
            FieldError::NoSeparator { .. }
        ));
    }

    #[test]
    fn test_parse_empty_tag() {
        let err = TagValue::parse(b"=value").unwrap_err();
        assert!(matches!(err, FieldError::NoTag { ref raw } if raw == "=value"));

        assert!(matches!(
            TagValue::parse(b"=A\x01").unwrap_err(),
            FieldError::NoTag { .. }
        ));
        assert!(matches!(
            TagValue::parse(b"=A=xx\x01").unwrap_err(),
            FieldError::NoTag { .. }
        ));
    }

    #[test]
    fn test_parse_invalid_tag() {
        assert!(matches!(
            TagValue::parse(b"3a=B\x01").unwrap_err(),
            FieldError::InvalidTag { .. }
        ));
        assert!(matches!(
            TagValue::parse(b"-5=B\x01").unwrap_err(),
            FieldError::InvalidTag { .. }
        ));
        assert!(matches!(
            TagValue::parse(b"99999999999=B\x01").unwrap_err(),
            FieldError::InvalidTag { .. }
        ));
    }

    #[test]
    fn test_parse_truncated() {
        assert!(matches!(
            TagValue::parse(b"35=").unwrap_err(),
            FieldError::Truncated { .. }
        ));
        assert!(matches!(
            TagValue::parse(b"1234=").unwrap_err(),
            FieldError::Truncated { .. }
        ));
    }

    #[test]
    fn test_fast_and_slow_paths_agree() {
        let short = TagValue::parse(b"35=A\x01").unwrap();
        assert_eq!(short.tag(), Tag::new(35));
        assert_eq!(short.value(), b"A");

        let long = TagValue::parse(b"12345=A\x01").unwrap();
        assert_eq!(long.tag(), Tag::new(12345));
        assert_eq!(long.value(), b"A");

        let inputs: [&[u8]; 9] = [
            b"8=A\x01",
            b"35=A\x01",
            b"122=X\x01",
            b"1128=9\x01",
            b"12345=A\x01",
            b"123456=long value\x01",
            b"8=\x01",
            b"9=12\x01",
            b"=A=xx\x01",
        ];
        for raw in inputs {
            assert_eq!(find_separator(raw), memchr(EQUALS, raw));
        }
    }

    #[test]
    fn test_value_contains_separator() {
        let tv = TagValue::parse(b"58=a=b\x01").unwrap();
        assert_eq!(tv.tag(), Tag::new(58));
        assert_eq!(tv.value(), b"a=b");
    }

    #[test]
    fn test_total_and_length() {
        let parsed = TagValue::parse(b"35=A\x01").unwrap();
        assert_eq!(parsed.total(), 51 + 53 + 61 + 65 + 1);
        assert_eq!(parsed.length(), 5);

        let built = TagValue::new(Tag::new(35), "A");
        assert_eq!(built.total(), 51 + 53 + 61 + 65);
        assert_eq!(built.length(), 4);
    }

    #[test]
    fn test_value_str_invalid_utf8() {
        let tv = TagValue::parse(b"58=\xFF\xFE\x01").unwrap();
        assert_eq!(tv.value_str().unwrap_err(), FieldError::InvalidUtf8 { tag: 58 });
    }
}
