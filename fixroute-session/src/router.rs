/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Message routing through the session directory.
//!
//! [`SessionRegistry::send`] derives the destination from the message header.
//! [`SessionRegistry::send_to_target`] and [`SessionRegistry::send_reject`]
//! take an explicit session ID.

use crate::registry::SessionRegistry;
use crate::session::Session;
use fixroute_core::error::{FieldError, Result, SessionError};
use fixroute_core::field::{Tag, tags};
use fixroute_core::reject::MessageRejectError;
use fixroute_core::types::SessionId;
use fixroute_tagvalue::{FieldMap, Messagable, Message};
use std::sync::Arc;
use tracing::{trace, warn};

impl SessionRegistry {
    /// Routes a message to the session named by its header.
    ///
    /// The session ID is built from BeginString (8), SenderCompID (49),
    /// SenderSubID (50), TargetCompID (56) and TargetSubID (57). The sub IDs
    /// are optional and default to empty.
    ///
    /// A header without SenderCompID is dropped with a warning and reported as
    /// success, unless [`RegistryConfig::require_sender_comp_id`] is set.
    ///
    /// [`RegistryConfig::require_sender_comp_id`]: crate::RegistryConfig::require_sender_comp_id
    ///
    /// # Errors
    /// - `FieldError::FieldNotFound` if BeginString or TargetCompID is missing
    /// - `FieldError::InvalidUtf8` if any routing field is present but not UTF-8
    /// - `SessionError::UnknownSession` if no session matches
    /// - whatever the session's `queue_for_send` returns
    pub fn send(&self, message: impl Messagable) -> Result<()> {
        let message = message.into_message();
        let Some(session_id) = self.route_of(&message.header)? else {
            return Ok(());
        };
        self.send_to_target(message, &session_id)
    }

    /// Queues a message on the session registered under `session_id`.
    ///
    /// # Errors
    /// Returns `SessionError::UnknownSession` if no session is registered under
    /// `session_id`, otherwise the session's `queue_for_send` result unchanged.
    pub fn send_to_target(&self, message: impl Messagable, session_id: &SessionId) -> Result<()> {
        let session = self.session_for(session_id)?;
        trace!(%session_id, "routing message");
        session.queue_for_send(message.into_message())
    }

    /// Hands `message` and `reject` to the session registered under
    /// `session_id` for rejection.
    ///
    /// # Errors
    /// Returns `SessionError::UnknownSession` if no session is registered under
    /// `session_id`, otherwise the session's `do_reject` result unchanged.
    pub fn send_reject(
        &self,
        message: Message,
        session_id: &SessionId,
        reject: MessageRejectError,
    ) -> Result<()> {
        let session = self.session_for(session_id)?;
        trace!(%session_id, reason = reject.reason(), "routing reject");
        session.do_reject(message, reject)
    }

    fn session_for(&self, session_id: &SessionId) -> Result<Arc<dyn Session>> {
        self.lookup(session_id).ok_or_else(|| {
            warn!(%session_id, "no session registered");
            SessionError::UnknownSession(session_id.clone()).into()
        })
    }

    /// Reads the routing identity from a header. `None` means the message is
    /// dropped.
    fn route_of(&self, header: &FieldMap<'_>) -> Result<Option<SessionId>> {
        let begin_string = header.get_str(tags::BEGIN_STRING)?;
        let target_comp_id = header.get_str(tags::TARGET_COMP_ID)?;
        let target_sub_id = optional_str(header, tags::TARGET_SUB_ID)?;

        let sender_comp_id = match header.get_str(tags::SENDER_COMP_ID) {
            Ok(sender_comp_id) => sender_comp_id,
            Err(FieldError::FieldNotFound { .. }) if !self.config.require_sender_comp_id => {
                warn!(
                    begin_string,
                    target_comp_id, "dropping message without SenderCompID"
                );
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let sender_sub_id = optional_str(header, tags::SENDER_SUB_ID)?;

        Ok(Some(
            SessionId::new(begin_string, sender_comp_id, target_comp_id)
                .with_sender_sub_id(sender_sub_id)
                .with_target_sub_id(target_sub_id),
        ))
    }
}

/// Reads an optional header field. Only an absent field reads as empty.
fn optional_str<'m>(header: &'m FieldMap<'_>, tag: Tag) -> Result<&'m str> {
    match header.get_str(tag) {
        Err(FieldError::FieldNotFound { .. }) => Ok(""),
        found => Ok(found?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::session::{Outbound, QueuedSession};
    use crossbeam_channel::Receiver;
    use fixroute_core::error::FixError;
    use parking_lot::Mutex;

    fn order() -> Message {
        let mut msg = Message::new();
        msg.header
            .set_str(tags::BEGIN_STRING, "FIX.4.2")
            .set_str(tags::MSG_TYPE, "D")
            .set_str(tags::SENDER_COMP_ID, "SENDER")
            .set_str(tags::TARGET_COMP_ID, "TARGET");
        msg.body.set_str(fixroute_core::Tag::new(11), "ORD1");
        msg
    }

    fn registered(registry: &SessionRegistry, id: SessionId) -> Receiver<Outbound> {
        let (session, rx) = QueuedSession::new(id);
        registry.register(Arc::new(session)).unwrap();
        rx
    }

    /// Counts calls and returns a canned error from every method.
    struct FailingSession {
        session_id: SessionId,
        calls: Mutex<usize>,
    }

    impl Session for FailingSession {
        fn session_id(&self) -> &SessionId {
            &self.session_id
        }

        fn queue_for_send(&self, _message: Message) -> Result<()> {
            *self.calls.lock() += 1;
            Err(SessionError::Disconnected(self.session_id.clone()).into())
        }

        fn do_reject(&self, _message: Message, _reject: MessageRejectError) -> Result<()> {
            *self.calls.lock() += 1;
            Err(SessionError::Disconnected(self.session_id.clone()).into())
        }
    }

    #[test]
    fn test_send_routes_by_header() {
        let registry = SessionRegistry::new();
        let rx = registered(&registry, SessionId::new("FIX.4.2", "SENDER", "TARGET"));

        registry.send(order()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Outbound::Message(order()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_uses_sub_ids() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.2", "SENDER", "TARGET")
            .with_sender_sub_id("DESK")
            .with_target_sub_id("BOOK");
        let rx = registered(&registry, id);
        let plain_rx = registered(&registry, SessionId::new("FIX.4.2", "SENDER", "TARGET"));

        let mut msg = order();
        msg.header
            .set_str(tags::SENDER_SUB_ID, "DESK")
            .set_str(tags::TARGET_SUB_ID, "BOOK");
        registry.send(msg).unwrap();

        assert!(rx.try_recv().is_ok());
        assert!(plain_rx.try_recv().is_err());
    }

    #[test]
    fn test_send_parsed_message() {
        let registry = SessionRegistry::new();
        let rx = registered(&registry, SessionId::new("FIX.4.2", "SENDER", "TARGET"));

        let wire = order().to_bytes().unwrap();
        let raw = fixroute_tagvalue::Decoder::new(&wire).decode().unwrap();
        registry.send(raw).unwrap();

        let Outbound::Message(sent) = rx.try_recv().unwrap() else {
            panic!("expected a message");
        };
        assert_eq!(sent.body.get_str(fixroute_core::Tag::new(11)).unwrap(), "ORD1");
    }

    #[test]
    fn test_send_unknown_session() {
        let registry = SessionRegistry::new();
        let other = registered(&registry, SessionId::new("FIX.4.2", "SENDER", "OTHER"));

        let err = registry.send(order()).unwrap_err();
        assert!(matches!(
            err,
            FixError::Session(SessionError::UnknownSession(ref id))
                if *id == SessionId::new("FIX.4.2", "SENDER", "TARGET")
        ));
        assert!(other.try_recv().is_err());
    }

    #[test]
    fn test_send_missing_required_header_fields() {
        let registry = SessionRegistry::new();

        let mut msg = order();
        msg.header.remove(tags::BEGIN_STRING);
        assert!(matches!(
            registry.send(msg).unwrap_err(),
            FixError::Field(FieldError::FieldNotFound { tag: 8 })
        ));

        let mut msg = order();
        msg.header.remove(tags::TARGET_COMP_ID);
        assert!(matches!(
            registry.send(msg).unwrap_err(),
            FixError::Field(FieldError::FieldNotFound { tag: 56 })
        ));
    }

    #[test]
    fn test_send_without_sender_comp_id_is_dropped() {
        let registry = SessionRegistry::new();
        let rx = registered(&registry, SessionId::new("FIX.4.2", "", "TARGET"));

        let mut msg = order();
        msg.header.remove(tags::SENDER_COMP_ID);
        registry.send(msg).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_without_sender_comp_id_when_required() {
        let registry =
            SessionRegistry::with_config(RegistryConfig::new().with_require_sender_comp_id(true));

        let mut msg = order();
        msg.header.remove(tags::SENDER_COMP_ID);
        assert!(matches!(
            registry.send(msg).unwrap_err(),
            FixError::Field(FieldError::FieldNotFound { tag: 49 })
        ));
    }

    #[test]
    fn test_send_non_utf8_sub_id_is_not_treated_as_absent() {
        let registry = SessionRegistry::new();
        let plain_rx = registered(&registry, SessionId::new("FIX.4.2", "SENDER", "TARGET"));

        let mut msg = order();
        msg.header.set_bytes(tags::TARGET_SUB_ID, b"\xFFDESK");
        assert!(matches!(
            registry.send(msg).unwrap_err(),
            FixError::Field(FieldError::InvalidUtf8 { tag: 57 })
        ));

        let mut msg = order();
        msg.header.set_bytes(tags::SENDER_SUB_ID, b"\xFFDESK");
        assert!(matches!(
            registry.send(msg).unwrap_err(),
            FixError::Field(FieldError::InvalidUtf8 { tag: 50 })
        ));

        assert!(plain_rx.try_recv().is_err());
    }

    #[test]
    fn test_send_non_utf8_sender_comp_id_is_an_error() {
        let registry = SessionRegistry::new();
        let rx = registered(&registry, SessionId::new("FIX.4.2", "", "TARGET"));

        let mut msg = order();
        msg.header.set_bytes(tags::SENDER_COMP_ID, b"\xFFSENDER");
        assert!(matches!(
            registry.send(msg).unwrap_err(),
            FixError::Field(FieldError::InvalidUtf8 { tag: 49 })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_to_target_passes_session_error_through() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.4", "SENDER", "TARGET");
        let session = Arc::new(FailingSession {
            session_id: id.clone(),
            calls: Mutex::new(0),
        });
        registry.register(session.clone()).unwrap();

        let err = registry.send_to_target(order(), &id).unwrap_err();
        assert!(matches!(
            err,
            FixError::Session(SessionError::Disconnected(_))
        ));
        assert_eq!(*session.calls.lock(), 1);
    }

    #[test]
    fn test_send_reject_delegates() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.2", "SENDER", "TARGET");
        let rx = registered(&registry, id.clone());
        let reject = MessageRejectError::value_is_incorrect(fixroute_core::Tag::new(54));

        registry.send_reject(order(), &id, reject.clone()).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Reject {
                message: order(),
                reject,
            }
        );
    }

    #[test]
    fn test_send_reject_unknown_session() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.2", "SENDER", "TARGET");
        let session = Arc::new(FailingSession {
            session_id: id.clone().with_target_sub_id("OTHER"),
            calls: Mutex::new(0),
        });
        registry.register(session.clone()).unwrap();

        let err = registry
            .send_reject(order(), &id, MessageRejectError::invalid_msg_type())
            .unwrap_err();
        assert!(matches!(
            err,
            FixError::Session(SessionError::UnknownSession(_))
        ));
        assert_eq!(*session.calls.lock(), 0);
    }
}
