/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # fixroute
//!
//! FIX session directory and zero-copy tag=value codec.
//!
//! ## Features
//!
//! - **Zero-copy fields**: `TagValue::parse` borrows the input buffer
//! - **Single-pass framing**: BodyLength and CheckSum from per-field totals
//! - **Session directory**: Concurrent register/unregister/lookup by session ID
//! - **Routing**: Header-derived and explicit delivery, plus out-of-band rejects
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fixroute::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = SessionRegistry::new();
//! let (session, outbound) = QueuedSession::new(SessionId::new("FIX.4.2", "SENDER", "TARGET"));
//! registry.register(Arc::new(session))?;
//!
//! let mut order = Message::new();
//! order.header
//!     .set_str(tags::BEGIN_STRING, "FIX.4.2")
//!     .set_str(tags::MSG_TYPE, "D")
//!     .set_str(tags::SENDER_COMP_ID, "SENDER")
//!     .set_str(tags::TARGET_COMP_ID, "TARGET");
//! registry.send(order)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Session identity, tags, rejects and error definitions
//! - [`tagvalue`]: Field codec, decoder and framing
//! - [`session`]: Session contract, directory and routing

pub mod core {
    //! Session identity, tags, rejects and error definitions.
    pub use fixroute_core::*;
}

pub mod tagvalue {
    //! Field codec, decoder and framing.
    pub use fixroute_tagvalue::*;
}

pub mod session {
    //! Session contract, directory and routing.
    pub use fixroute_session::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixroute_core::{
        DecodeError, FieldError, FixError, MessageRejectError, Result, SessionError,
        SessionId, SessionRejectReason, Tag, tags,
    };

    // Tag-value codec
    pub use fixroute_tagvalue::{Decoder, FieldMap, Messagable, Message, RawMessage, TagValue};

    // Session directory
    pub use fixroute_session::{Outbound, QueuedSession, RegistryConfig, Session, SessionRegistry};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_prelude_imports() {
        let field = TagValue::new(tags::MSG_TYPE, "A");
        assert_eq!(field.as_bytes(), b"35=A");
        assert!(SessionRegistry::new().is_empty());
    }

    #[test]
    fn test_parse_and_route() {
        let registry = SessionRegistry::new();
        let (session, outbound) =
            QueuedSession::new(SessionId::new("FIX.4.2", "SENDER", "TARGET"));
        registry.register(Arc::new(session)).unwrap();

        let wire = b"8=FIX.4.2\x019=33\x0135=D\x0149=SENDER\x0156=TARGET\x0111=ORD1\x0110=120\x01";
        let raw = Decoder::new(wire).decode().unwrap();
        registry.send(raw).unwrap();

        let Outbound::Message(sent) = outbound.try_recv().unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(sent.to_bytes().unwrap().as_ref(), wire);
    }
}
