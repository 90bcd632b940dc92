/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Session directory.
//!
//! A [`SessionRegistry`] maps each [`SessionId`] to the live session that owns
//! it. Lookups share a read lock; register, unregister and clear take the write
//! lock. Sessions are handed out as `Arc` clones, so no session method ever
//! runs while the table is locked.

use crate::config::RegistryConfig;
use crate::session::Session;
use fixroute_core::error::{Result, SessionError};
use fixroute_core::types::SessionId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Directory of live sessions keyed by identity.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<dyn Session>>>,
    pub(crate) config: RegistryConfig,
}

impl SessionRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::with_capacity(config.initial_capacity)),
            config,
        }
    }

    /// Returns the registry configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Adds `session` under its own session ID.
    ///
    /// # Errors
    /// Returns `SessionError::DuplicateSessionId` if the ID is already taken.
    /// The existing entry is left in place.
    pub fn register(&self, session: Arc<dyn Session>) -> Result<()> {
        let session_id = session.session_id().clone();
        match self.sessions.write().entry(session_id) {
            Entry::Occupied(entry) => {
                warn!(session_id = %entry.key(), "duplicate session registration rejected");
                Err(SessionError::DuplicateSessionId(entry.key().clone()).into())
            }
            Entry::Vacant(entry) => {
                debug!(session_id = %entry.key(), "session registered");
                entry.insert(session);
                Ok(())
            }
        }
    }

    /// Removes the session registered under `session_id`.
    ///
    /// # Errors
    /// Returns `SessionError::UnknownSession` if nothing is registered under it.
    pub fn unregister(&self, session_id: &SessionId) -> Result<()> {
        if self.sessions.write().remove(session_id).is_none() {
            return Err(SessionError::UnknownSession(session_id.clone()).into());
        }
        debug!(%session_id, "session unregistered");
        Ok(())
    }

    /// Returns the session registered under `session_id`, if any.
    #[must_use]
    pub fn lookup(&self, session_id: &SessionId) -> Option<Arc<dyn Session>> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Returns true if a session is registered under `session_id`.
    #[must_use]
    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().contains_key(session_id)
    }

    /// Returns the number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Returns a sorted snapshot of the registered session IDs.
    #[must_use]
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Removes every session, returning how many were registered.
    pub fn clear(&self) -> usize {
        let removed = {
            let mut sessions = self.sessions.write();
            let removed = sessions.len();
            sessions.clear();
            removed
        };
        debug!(removed, "session registry cleared");
        removed
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.session_ids())
            .field("config", &self.config)
            .finish()
    }
}
