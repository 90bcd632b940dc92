/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # fixroute Session
//!
//! Process-wide directory of live FIX sessions and the routing built on it.
//!
//! This crate provides:
//! - **Session contract**: The [`Session`] trait the directory delivers to
//! - **Queued sessions**: [`QueuedSession`], a channel-backed implementation
//! - **Directory**: [`SessionRegistry`] with register/unregister/lookup
//! - **Routing**: `send`, `send_to_target` and `send_reject`
//! - **Configuration**: [`RegistryConfig`]

pub mod config;
pub mod registry;
pub mod router;
pub mod session;

pub use config::RegistryConfig;
pub use registry::SessionRegistry;
pub use session::{Outbound, QueuedSession, Session};
