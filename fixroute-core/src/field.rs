/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Field tag type and the well-known header and trailer tags.
//!
//! This module provides:
//! - [`Tag`]: Type-safe wrapper for FIX field tag numbers
//! - [`tags`]: Constants for the tags the routing core reads by number

use serde::{Deserialize, Serialize};
use std::fmt;

/// FIX field tag number.
///
/// Tags are non-negative integers that identify fields within a FIX message.
/// Standard tags are defined by the FIX standard (1-5000 range),
/// while user-defined tags use the 5001+ range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Tag(u32);

impl Tag {
    /// Creates a new tag.
    #[inline]
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true if this is a standard FIX tag (1-5000).
    #[inline]
    #[must_use]
    pub const fn is_standard(self) -> bool {
        self.0 >= 1 && self.0 <= 5000
    }

    /// Returns true if this is a user-defined tag (5001+).
    #[inline]
    #[must_use]
    pub const fn is_user_defined(self) -> bool {
        self.0 > 5000
    }

    /// Returns true if this tag belongs in the standard message header.
    #[inline]
    #[must_use]
    pub const fn is_header(self) -> bool {
        tags::is_header(self)
    }

    /// Returns true if this tag belongs in the standard message trailer.
    #[inline]
    #[must_use]
    pub const fn is_trailer(self) -> bool {
        tags::is_trailer(self)
    }
}

impl From<u32> for Tag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<Tag> for u32 {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known tag numbers.
pub mod tags {
    use super::Tag;

    /// BeginString (8).
    pub const BEGIN_STRING: Tag = Tag::new(8);
    /// BodyLength (9).
    pub const BODY_LENGTH: Tag = Tag::new(9);
    /// CheckSum (10).
    pub const CHECK_SUM: Tag = Tag::new(10);
    /// MsgSeqNum (34).
    pub const MSG_SEQ_NUM: Tag = Tag::new(34);
    /// MsgType (35).
    pub const MSG_TYPE: Tag = Tag::new(35);
    /// PossDupFlag (43).
    pub const POSS_DUP_FLAG: Tag = Tag::new(43);
    /// SenderCompID (49).
    pub const SENDER_COMP_ID: Tag = Tag::new(49);
    /// SenderSubID (50).
    pub const SENDER_SUB_ID: Tag = Tag::new(50);
    /// SendingTime (52).
    pub const SENDING_TIME: Tag = Tag::new(52);
    /// TargetCompID (56).
    pub const TARGET_COMP_ID: Tag = Tag::new(56);
    /// TargetSubID (57).
    pub const TARGET_SUB_ID: Tag = Tag::new(57);
    /// Text (58).
    pub const TEXT: Tag = Tag::new(58);
    /// Signature (89).
    pub const SIGNATURE: Tag = Tag::new(89);
    /// SecureDataLen (90).
    pub const SECURE_DATA_LEN: Tag = Tag::new(90);
    /// SecureData (91).
    pub const SECURE_DATA: Tag = Tag::new(91);
    /// SignatureLength (93).
    pub const SIGNATURE_LENGTH: Tag = Tag::new(93);
    /// PossResend (97).
    pub const POSS_RESEND: Tag = Tag::new(97);
    /// OnBehalfOfCompID (115).
    pub const ON_BEHALF_OF_COMP_ID: Tag = Tag::new(115);
    /// OnBehalfOfSubID (116).
    pub const ON_BEHALF_OF_SUB_ID: Tag = Tag::new(116);
    /// OrigSendingTime (122).
    pub const ORIG_SENDING_TIME: Tag = Tag::new(122);
    /// DeliverToCompID (128).
    pub const DELIVER_TO_COMP_ID: Tag = Tag::new(128);
    /// DeliverToSubID (129).
    pub const DELIVER_TO_SUB_ID: Tag = Tag::new(129);
    /// SenderLocationID (142).
    pub const SENDER_LOCATION_ID: Tag = Tag::new(142);
    /// TargetLocationID (143).
    pub const TARGET_LOCATION_ID: Tag = Tag::new(143);
    /// OnBehalfOfLocationID (144).
    pub const ON_BEHALF_OF_LOCATION_ID: Tag = Tag::new(144);
    /// DeliverToLocationID (145).
    pub const DELIVER_TO_LOCATION_ID: Tag = Tag::new(145);
    /// XmlDataLen (212).
    pub const XML_DATA_LEN: Tag = Tag::new(212);
    /// XmlData (213).
    pub const XML_DATA: Tag = Tag::new(213);
    /// MessageEncoding (347).
    pub const MESSAGE_ENCODING: Tag = Tag::new(347);
    /// LastMsgSeqNumProcessed (369).
    pub const LAST_MSG_SEQ_NUM_PROCESSED: Tag = Tag::new(369);
    /// NoHops (627).
    pub const NO_HOPS: Tag = Tag::new(627);
    /// HopCompID (628).
    pub const HOP_COMP_ID: Tag = Tag::new(628);
    /// HopSendingTime (629).
    pub const HOP_SENDING_TIME: Tag = Tag::new(629);
    /// HopRefID (630).
    pub const HOP_REF_ID: Tag = Tag::new(630);
    /// ApplVerID (1128).
    pub const APPL_VER_ID: Tag = Tag::new(1128);
    /// CstmApplVerID (1129).
    pub const CSTM_APPL_VER_ID: Tag = Tag::new(1129);
    /// ApplExtID (1156).
    pub const APPL_EXT_ID: Tag = Tag::new(1156);

    /// Returns true if `tag` is a standard header tag.
    #[must_use]
    pub const fn is_header(tag: Tag) -> bool {
        matches!(
            tag.value(),
            // framing and sequencing
            8 | 9 | 34 | 35 | 43 | 52 | 97 | 122 | 369
                // routing: comp, sub and location IDs
                | 49 | 50 | 56 | 57 | 115 | 116 | 128 | 129 | 142 | 143 | 144 | 145
                // secure and XML payloads
                | 90 | 91 | 212 | 213 | 347
                // hop repeating group
                | 627 | 628 | 629 | 630
                // FIXT application versioning
                | 1128 | 1129 | 1156
        )
    }

    /// Returns true if `tag` is a standard trailer tag.
    #[must_use]
    pub const fn is_trailer(tag: Tag) -> bool {
        matches!(tag.value(), 10 | 89 | 93)
    }
}
