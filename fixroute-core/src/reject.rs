/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Message reject reasons handed to a session's reject path.

use crate::field::Tag;
use std::fmt;

/// SessionRejectReason (373) codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionRejectReason {
    /// Invalid tag number (0).
    InvalidTagNumber,
    /// Required tag missing (1).
    RequiredTagMissing,
    /// Tag not defined for this message type (2).
    TagNotDefinedForThisMessageType,
    /// Undefined tag (3).
    UndefinedTag,
    /// Tag specified without a value (4).
    TagSpecifiedWithoutAValue,
    /// Value is incorrect, out of range, for this tag (5).
    ValueIsIncorrect,
    /// Incorrect data format for value (6).
    IncorrectDataFormat,
    /// Decryption problem (7).
    DecryptionProblem,
    /// Signature problem (8).
    SignatureProblem,
    /// CompID problem (9).
    CompIdProblem,
    /// SendingTime accuracy problem (10).
    SendingTimeAccuracyProblem,
    /// Invalid MsgType (11).
    InvalidMsgType,
    /// Tag appears more than once (13).
    TagAppearsMoreThanOnce,
    /// Tag specified out of required order (14).
    TagSpecifiedOutOfRequiredOrder,
    /// Repeating group fields out of order (15).
    RepeatingGroupFieldsOutOfOrder,
    /// Incorrect NumInGroup count for repeating group (16).
    IncorrectNumInGroupCount,
    /// Other (99).
    Other,
}

impl SessionRejectReason {
    /// Returns the numeric code sent in tag 373.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::InvalidTagNumber => 0,
            Self::RequiredTagMissing => 1,
            Self::TagNotDefinedForThisMessageType => 2,
            Self::UndefinedTag => 3,
            Self::TagSpecifiedWithoutAValue => 4,
            Self::ValueIsIncorrect => 5,
            Self::IncorrectDataFormat => 6,
            Self::DecryptionProblem => 7,
            Self::SignatureProblem => 8,
            Self::CompIdProblem => 9,
            Self::SendingTimeAccuracyProblem => 10,
            Self::InvalidMsgType => 11,
            Self::TagAppearsMoreThanOnce => 13,
            Self::TagSpecifiedOutOfRequiredOrder => 14,
            Self::RepeatingGroupFieldsOutOfOrder => 15,
            Self::IncorrectNumInGroupCount => 16,
            Self::Other => 99,
        }
    }
}

/// Reason a message is being rejected.
///
/// Either a session-level reject (35=3) carrying a [`SessionRejectReason`]
/// code, or a business-level reject (35=j) carrying a BusinessRejectReason
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRejectError {
    reason: u32,
    text: String,
    ref_tag_id: Option<Tag>,
    business_reject_ref_id: Option<String>,
    is_business_reject: bool,
}

impl MessageRejectError {
    /// Creates a session-level reject.
    #[must_use]
    pub fn new(reason: SessionRejectReason, text: impl Into<String>, ref_tag_id: Option<Tag>) -> Self {
        Self {
            reason: reason.code(),
            text: text.into(),
            ref_tag_id,
            business_reject_ref_id: None,
            is_business_reject: false,
        }
    }

    /// Creates a business-level reject with a BusinessRejectReason (380) code.
    #[must_use]
    pub fn business_reject(text: impl Into<String>, reason_code: u32) -> Self {
        Self {
            reason: reason_code,
            text: text.into(),
            ref_tag_id: None,
            business_reject_ref_id: None,
            is_business_reject: true,
        }
    }

    /// Sets the BusinessRejectRefID (379).
    #[must_use]
    pub fn with_business_reject_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.business_reject_ref_id = Some(ref_id.into());
        self
    }

    /// Required tag missing.
    #[must_use]
    pub fn required_tag_missing(tag: Tag) -> Self {
        Self::new(
            SessionRejectReason::RequiredTagMissing,
            "Required tag missing",
            Some(tag),
        )
    }

    /// Tag not defined for this message type.
    #[must_use]
    pub fn tag_not_defined_for_this_message_type(tag: Tag) -> Self {
        Self::new(
            SessionRejectReason::TagNotDefinedForThisMessageType,
            "Tag not defined for this message type",
            Some(tag),
        )
    }

    /// Tag specified without a value.
    #[must_use]
    pub fn tag_specified_without_a_value(tag: Tag) -> Self {
        Self::new(
            SessionRejectReason::TagSpecifiedWithoutAValue,
            "Tag specified without a value",
            Some(tag),
        )
    }

    /// Value is incorrect (out of range) for this tag.
    #[must_use]
    pub fn value_is_incorrect(tag: Tag) -> Self {
        Self::new(
            SessionRejectReason::ValueIsIncorrect,
            "Value is incorrect (out of range) for this tag",
            Some(tag),
        )
    }

    /// Incorrect data format for value.
    #[must_use]
    pub fn incorrect_data_format(tag: Tag) -> Self {
        Self::new(
            SessionRejectReason::IncorrectDataFormat,
            "Incorrect data format for value",
            Some(tag),
        )
    }

    /// Invalid tag number.
    #[must_use]
    pub fn invalid_tag_number(tag: Tag) -> Self {
        Self::new(
            SessionRejectReason::InvalidTagNumber,
            "Invalid tag number",
            Some(tag),
        )
    }

    /// Invalid MsgType.
    #[must_use]
    pub fn invalid_msg_type() -> Self {
        Self::new(
            SessionRejectReason::InvalidMsgType,
            "Invalid MsgType",
            None,
        )
    }

    /// Conditionally required field missing, sent as a business reject.
    #[must_use]
    pub fn conditionally_required_field_missing(tag: Tag) -> Self {
        let mut rej = Self::business_reject("Conditionally required field missing", 5);
        rej.ref_tag_id = Some(tag);
        rej
    }

    /// Returns the reject reason code.
    #[must_use]
    pub const fn reason(&self) -> u32 {
        self.reason
    }

    /// Returns the human-readable reject text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the tag that caused the rejection, if any.
    #[must_use]
    pub const fn ref_tag_id(&self) -> Option<Tag> {
        self.ref_tag_id
    }

    /// Returns the BusinessRejectRefID, if any.
    #[must_use]
    pub fn business_reject_ref_id(&self) -> Option<&str> {
        self.business_reject_ref_id.as_deref()
    }

    /// Returns true if this is a business-level reject.
    #[must_use]
    pub const fn is_business_reject(&self) -> bool {
        self.is_business_reject
    }
}

impl fmt::Display for MessageRejectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(tag) = self.ref_tag_id {
            write!(f, " (ref tag {tag})")?;
        }
        Ok(())
    }
}

impl std::error::Error for MessageRejectError {}
