/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Zero-copy FIX message decoder.
//!
//! The decoder splits a buffer into fields at each SOH and parses every field
//! with [`TagValue::parse`], so field values are references into the original
//! buffer. BodyLength and CheckSum are verified from the per-field lengths and
//! byte totals gathered while walking the fields.

use crate::checksum::{checksum_from_total, parse_checksum};
use crate::field_map::FieldMap;
use crate::message::RawMessage;
use crate::tag_value::{SOH, TagValue};
use fixroute_core::error::{DecodeError, FieldError};
use fixroute_core::field::tags;
use memchr::memchr;

/// Zero-copy FIX message decoder.
#[derive(Debug)]
pub struct Decoder<'a> {
    /// Input buffer.
    input: &'a [u8],
    /// Current position in the buffer.
    offset: usize,
    /// Whether to validate checksums.
    validate_checksum: bool,
    /// Whether to validate the declared body length.
    validate_length: bool,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given input buffer.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            validate_checksum: true,
            validate_length: true,
        }
    }

    /// Sets whether to validate checksums during decoding.
    #[inline]
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets whether to validate BodyLength during decoding.
    #[inline]
    #[must_use]
    pub const fn with_length_validation(mut self, validate: bool) -> Self {
        self.validate_length = validate;
        self
    }

    /// Decodes one complete FIX message starting at the current offset.
    ///
    /// # Errors
    /// Returns `DecodeError` if the message is malformed or incomplete.
    pub fn decode(&mut self) -> Result<RawMessage<'a>, DecodeError> {
        let start_offset = self.offset;
        let mut header = FieldMap::new();
        let mut body = FieldMap::new();
        let mut trailer = FieldMap::new();

        let begin_string = self.next_field()?.ok_or(DecodeError::Incomplete)?;
        if begin_string.tag() != tags::BEGIN_STRING {
            return Err(DecodeError::InvalidBeginString);
        }
        let mut total = begin_string.total();
        header.push(begin_string);

        let body_length_field = self.next_field()?.ok_or(DecodeError::MissingBodyLength)?;
        if body_length_field.tag() != tags::BODY_LENGTH {
            return Err(DecodeError::MissingBodyLength);
        }
        let declared_len: usize = body_length_field
            .value_str()
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(DecodeError::InvalidBodyLength)?;
        total = total.wrapping_add(body_length_field.total());
        header.push(body_length_field);

        let body_start = self.offset;

        let msg_type = self.next_field()?.ok_or(DecodeError::MissingMsgType)?;
        if msg_type.tag() != tags::MSG_TYPE {
            return Err(DecodeError::MissingMsgType);
        }
        total = total.wrapping_add(msg_type.total());
        header.push(msg_type);

        let checksum = loop {
            let body_end = self.offset;
            let field = self.next_field()?.ok_or(DecodeError::Incomplete)?;
            if field.tag() == tags::CHECK_SUM {
                break (field, body_end);
            }
            total = total.wrapping_add(field.total());
            if field.tag().is_header() {
                header.push(field);
            } else if field.tag().is_trailer() {
                trailer.push(field);
            } else {
                body.push(field);
            }
        };
        let (checksum_field, body_end) = checksum;

        if self.validate_length && body_end - body_start != declared_len {
            return Err(DecodeError::BodyLengthMismatch {
                declared: declared_len,
                actual: body_end - body_start,
            });
        }

        if self.validate_checksum {
            let declared = parse_checksum(checksum_field.value()).ok_or_else(|| {
                FieldError::InvalidValue {
                    tag: tags::CHECK_SUM.value(),
                    reason: "invalid checksum format".to_string(),
                }
            })?;
            let calculated = checksum_from_total(total);
            if calculated != declared {
                return Err(DecodeError::ChecksumMismatch {
                    calculated,
                    declared,
                });
            }
        }
        trailer.push(checksum_field);

        Ok(RawMessage::new(
            &self.input[start_offset..self.offset],
            header,
            body,
            trailer,
        ))
    }

    /// Parses the next field from the buffer.
    ///
    /// # Returns
    /// The next field, or `None` if no complete field remains.
    ///
    /// # Errors
    /// Returns `FieldError` if the next field is malformed.
    #[inline]
    pub fn next_field(&mut self) -> Result<Option<TagValue<'a>>, FieldError> {
        let input: &'a [u8] = self.input;
        let remaining = &input[self.offset..];
        let Some(soh_pos) = memchr(SOH, remaining) else {
            return Ok(None);
        };

        let field = TagValue::parse(&remaining[..=soh_pos])?;
        self.offset += soh_pos + 1;
        Ok(Some(field))
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the remaining bytes in the buffer.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Resets the decoder to the beginning of the buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
