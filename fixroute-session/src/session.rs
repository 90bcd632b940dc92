/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Session collaborator contract.
//!
//! The directory only needs two things from a session: a way to queue an
//! outbound message and a way to reject a message. The protocol state machine
//! behind them lives elsewhere.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use fixroute_core::error::{Result, SessionError};
use fixroute_core::reject::MessageRejectError;
use fixroute_core::types::SessionId;
use fixroute_tagvalue::Message;
use tracing::trace;

/// A live FIX session as seen by the session directory.
pub trait Session: Send + Sync {
    /// Returns the identity the session is registered under.
    fn session_id(&self) -> &SessionId;

    /// Queues a message for sending on this session.
    ///
    /// # Errors
    /// Implementation defined; the directory returns it unchanged.
    fn queue_for_send(&self, message: Message) -> Result<()>;

    /// Rejects `message` with `reject`.
    ///
    /// # Errors
    /// Implementation defined; the directory returns it unchanged.
    fn do_reject(&self, message: Message, reject: MessageRejectError) -> Result<()>;
}

/// Work handed from a [`QueuedSession`] to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A message to send.
    Message(Message),
    /// A message to reject.
    Reject {
        /// The message being rejected.
        message: Message,
        /// Why it is rejected.
        reject: MessageRejectError,
    },
}

/// Session that forwards outbound work into a channel.
///
/// The receiving half belongs to whatever drives the session's protocol
/// logic and transport. Once it is dropped, every call fails with
/// [`SessionError::Disconnected`].
#[derive(Debug, Clone)]
pub struct QueuedSession {
    session_id: SessionId,
    tx: Sender<Outbound>,
}

impl QueuedSession {
    /// Creates a session backed by an unbounded queue.
    #[must_use]
    pub fn new(session_id: SessionId) -> (Self, Receiver<Outbound>) {
        let (tx, rx) = unbounded();
        (Self { session_id, tx }, rx)
    }

    /// Creates a session backed by a queue holding at most `capacity` items.
    ///
    /// Sending blocks while the queue is full.
    #[must_use]
    pub fn with_capacity(session_id: SessionId, capacity: usize) -> (Self, Receiver<Outbound>) {
        let (tx, rx) = bounded(capacity);
        (Self { session_id, tx }, rx)
    }

    /// Returns the number of queued items not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tx.len()
    }

    fn push(&self, item: Outbound) -> Result<()> {
        self.tx
            .send(item)
            .map_err(|_| SessionError::Disconnected(self.session_id.clone()).into())
    }
}

impl Session for QueuedSession {
    fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    fn queue_for_send(&self, message: Message) -> Result<()> {
        trace!(session_id = %self.session_id, "queueing message");
        self.push(Outbound::Message(message))
    }

    fn do_reject(&self, message: Message, reject: MessageRejectError) -> Result<()> {
        trace!(session_id = %self.session_id, reason = reject.reason(), "queueing reject");
        self.push(Outbound::Reject { message, reject })
    }
}
