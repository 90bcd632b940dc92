/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Message types.
//!
//! This module provides:
//! - [`Message`]: Owned message for building, storage and cross-thread transfer
//! - [`RawMessage`]: Zero-copy view produced by the [`Decoder`](crate::Decoder)
//! - [`Messagable`]: Conversion of either into the owned form used for routing

use crate::decoder::Decoder;
use crate::encoder::encode;
use crate::field_map::FieldMap;
use bytes::{Bytes, BytesMut};
use fixroute_core::error::{DecodeError, FieldError};
use fixroute_core::field::tags;

/// Anything that can be turned into a [`Message`] for sending.
pub trait Messagable {
    /// Converts `self` into an owned message.
    fn into_message(self) -> Message;
}

/// Owned FIX message split into header, body and trailer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Standard header fields.
    pub header: FieldMap<'static>,
    /// Body fields.
    pub body: FieldMap<'static>,
    /// Standard trailer fields.
    pub trailer: FieldMap<'static>,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a complete wire message into an owned message.
    ///
    /// # Errors
    /// Returns `DecodeError` if the message is malformed or incomplete.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        Decoder::new(data).decode().map(Messagable::into_message)
    }

    /// Returns the MsgType (35) value.
    ///
    /// # Errors
    /// Returns `FieldError::FieldNotFound` if the header has no MsgType.
    pub fn msg_type(&self) -> Result<&str, FieldError> {
        self.header.get_str(tags::MSG_TYPE)
    }

    /// Encodes the message, computing BodyLength and CheckSum.
    ///
    /// # Errors
    /// Returns `FieldError::FieldNotFound` if BeginString is missing.
    pub fn to_bytes(&self) -> Result<Bytes, FieldError> {
        let mut buf = BytesMut::with_capacity(256);
        encode(self, &mut buf)?;
        Ok(buf.freeze())
    }
}

impl Messagable for Message {
    fn into_message(self) -> Message {
        self
    }
}

/// Zero-copy view of a decoded FIX message.
///
/// Every field borrows the decoded buffer.
#[derive(Debug, Clone)]
pub struct RawMessage<'a> {
    buffer: &'a [u8],
    header: FieldMap<'a>,
    body: FieldMap<'a>,
    trailer: FieldMap<'a>,
}

impl<'a> RawMessage<'a> {
    /// Creates a view from decoded components.
    #[must_use]
    pub fn new(
        buffer: &'a [u8],
        header: FieldMap<'a>,
        body: FieldMap<'a>,
        trailer: FieldMap<'a>,
    ) -> Self {
        Self {
            buffer,
            header,
            body,
            trailer,
        }
    }

    /// Returns the complete message bytes.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Returns the header fields.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &FieldMap<'a> {
        &self.header
    }

    /// Returns the body fields.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &FieldMap<'a> {
        &self.body
    }

    /// Returns the trailer fields.
    #[inline]
    #[must_use]
    pub fn trailer(&self) -> &FieldMap<'a> {
        &self.trailer
    }

    /// Returns the MsgType (35) value.
    ///
    /// # Errors
    /// Returns `FieldError` if MsgType is missing or not UTF-8.
    pub fn msg_type(&self) -> Result<&str, FieldError> {
        self.header.get_str(tags::MSG_TYPE)
    }

    /// Returns the message length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the message is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Messagable for RawMessage<'_> {
    fn into_message(self) -> Message {
        Message {
            header: self.header.into_owned(),
            body: self.body.into_owned(),
            trailer: self.trailer.into_owned(),
        }
    }
}
