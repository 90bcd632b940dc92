/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # fixroute Tag-Value
//!
//! Zero-copy FIX tag=value field codec and message framing.
//!
//! This crate provides the single-field codec every higher layer is built
//! on, plus the message-level pieces assembled from it.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: [`TagValue::parse`] borrows the input buffer
//! - **Fast separator search**: short tags are probed directly, longer ones use `memchr`
//! - **Single-pass framing**: BodyLength and CheckSum come from per-field totals
//! - **Messages**: [`FieldMap`], owned [`Message`] and borrowed [`RawMessage`]

pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod field_map;
pub mod message;
pub mod tag_value;

pub use checksum::{calculate_checksum, checksum_from_total};
pub use decoder::Decoder;
pub use encoder::encode;
pub use field_map::FieldMap;
pub use message::{Messagable, Message, RawMessage};
pub use tag_value::{EQUALS, SOH, TagValue};
