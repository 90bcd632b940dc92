/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # fixroute Core
//!
//! Core types and error definitions shared by the fixroute crates.
//!
//! This crate provides the fundamental building blocks:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Tags**: [`Tag`] and the well-known header/trailer tag numbers
//! - **Session identity**: [`SessionId`], the key of the session directory
//! - **Rejects**: [`MessageRejectError`] for the out-of-band reject path

pub mod error;
pub mod field;
pub mod reject;
pub mod types;

pub use error::{DecodeError, FieldError, FixError, Result, SessionError};
pub use field::{Tag, tags};
pub use reject::{MessageRejectError, SessionRejectReason};
pub use types::SessionId;
