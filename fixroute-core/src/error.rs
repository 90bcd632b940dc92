/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types for the fixroute routing core.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across field parsing, message framing and session
//! routing.

use crate::types::SessionId;
use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all fixroute operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixError {
    /// Error while parsing or reading a single field.
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Error while decoding a complete message.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error in the session directory or a session collaborator.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Errors produced by the tag-value codec and by field lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The raw field contains no `=` separator.
    #[error("no '=' separator in '{raw}'")]
    NoSeparator {
        /// The offending raw field, lossily decoded.
        raw: String,
    },

    /// The separator is the first byte, so the tag is empty.
    #[error("no tag in '{raw}'")]
    NoTag {
        /// The offending raw field, lossily decoded.
        raw: String,
    },

    /// The bytes before the separator are not a valid tag number.
    #[error("invalid tag in '{raw}': {reason}")]
    InvalidTag {
        /// The offending raw field, lossily decoded.
        raw: String,
        /// Why the tag could not be parsed.
        reason: String,
    },

    /// The separator is the final byte, leaving no room for the delimiter.
    #[error("truncated field '{raw}': missing value delimiter")]
    Truncated {
        /// The offending raw field, lossily decoded.
        raw: String,
    },

    /// A field was requested that the map does not contain.
    #[error("field not found: tag {tag}")]
    FieldNotFound {
        /// The requested tag number.
        tag: u32,
    },

    /// A field value is not valid UTF-8.
    #[error("invalid utf-8 in value of tag {tag}")]
    InvalidUtf8 {
        /// The tag number of the field.
        tag: u32,
    },

    /// A field value could not be converted to the requested type.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },
}

impl FieldError {
    /// Returns true for the malformed-field kinds reported by the codec.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::NoSeparator { .. }
                | Self::NoTag { .. }
                | Self::InvalidTag { .. }
                | Self::Truncated { .. }
        )
    }
}

/// Errors that occur while decoding a complete FIX message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Message buffer is incomplete, need more data.
    #[error("incomplete message, need more data")]
    Incomplete,

    /// The first field is not BeginString (tag 8).
    #[error("invalid begin string: expected 8=FIX.x.y")]
    InvalidBeginString,

    /// The second field is not BodyLength (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// BodyLength value is not a number.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// The third field is not MsgType (tag 35).
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Declared BodyLength does not match the bytes on the wire.
    #[error("body length mismatch: declared {declared}, actual {actual}")]
    BodyLengthMismatch {
        /// BodyLength value in the message.
        declared: usize,
        /// Counted body length.
        actual: usize,
    },

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in message.
        declared: u8,
    },

    /// A field inside the message is malformed.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Errors raised by the session directory and session collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A session with the same identity is already registered.
    #[error("duplicate session id: {0}")]
    DuplicateSessionId(SessionId),

    /// No session is registered under the identity.
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),

    /// The session can no longer accept outbound messages.
    #[error("session disconnected: {0}")]
    Disconnected(SessionId),
}
