/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! FIX message framing.
//!
//! Writes a [`Message`] in tag=value form, prepending BeginString and
//! BodyLength and appending CheckSum. BodyLength and CheckSum are accumulated
//! from the per-field [`TagValue::length`] and [`TagValue::total`] values in
//! the same pass that writes the fields, so the output is never rescanned.

use crate::checksum::{checksum_from_total, format_checksum};
use crate::field_map::{FieldMap, wire_length, wire_total};
use crate::message::Message;
use crate::tag_value::{SOH, TagValue};
use bytes::{BufMut, BytesMut};
use fixroute_core::error::FieldError;
use fixroute_core::field::{Tag, tags};

/// Tags the framer computes itself and skips in the field maps.
const FRAMING_TAGS: [Tag; 3] = [tags::BEGIN_STRING, tags::BODY_LENGTH, tags::CHECK_SUM];

/// Encodes `msg` into `buf`.
///
/// Any BeginString, BodyLength or CheckSum already in the maps is replaced:
/// BeginString keeps its value and moves to the front, the other two are
/// recomputed.
///
/// # Errors
/// Returns `FieldError::FieldNotFound` if the header has no BeginString.
pub fn encode(msg: &Message, buf: &mut BytesMut) -> Result<(), FieldError> {
    let begin_string = TagValue::new(
        tags::BEGIN_STRING,
        msg.header.get_bytes(tags::BEGIN_STRING)?,
    );

    let sections = [&msg.header, &msg.body, &msg.trailer];
    let body_len: usize = sections
        .iter()
        .map(|section| section.length_excluding(&FRAMING_TAGS))
        .sum();

    let mut len_buf = itoa::Buffer::new();
    let body_length = TagValue::new(tags::BODY_LENGTH, len_buf.format(body_len));

    buf.reserve(wire_length(&begin_string) + wire_length(&body_length) + body_len + 7);

    let mut total = put_field(buf, &begin_string);
    total = total.wrapping_add(put_field(buf, &body_length));
    for section in sections {
        total = total.wrapping_add(put_section(buf, section));
    }

    buf.put_slice(b"10=");
    buf.put_slice(&format_checksum(checksum_from_total(total)));
    buf.put_u8(SOH);

    Ok(())
}

/// Writes every non-framing field of `section`, returning their byte total.
fn put_section(buf: &mut BytesMut, section: &FieldMap<'_>) -> u32 {
    section
        .iter()
        .filter(|f| !FRAMING_TAGS.contains(&f.tag()))
        .fold(0u32, |acc, f| acc.wrapping_add(put_field(buf, f)))
}

/// Writes one field and its delimiter, returning the field's byte total.
#[inline]
fn put_field(buf: &mut BytesMut, field: &TagValue<'_>) -> u32 {
    buf.put_slice(field.as_bytes());
    if !field.has_delimiter() {
        buf.put_u8(SOH);
    }
    wire_total(field)
}
