/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Core value types for session identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BeginString used by FIX 5.0+ sessions.
pub const BEGIN_STRING_FIXT11: &str = "FIXT.1.1";

/// Identity of a FIX session.
///
/// Equality and hashing are structural over all five fields. Sub IDs are
/// optional on the wire and stored as the empty string when absent, so a
/// session registered without sub IDs matches a message that carries none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId {
    /// BeginString (FIX version).
    pub begin_string: String,
    /// Sender CompID.
    pub sender_comp_id: String,
    /// Sender SubID, empty when absent.
    pub sender_sub_id: String,
    /// Target CompID.
    pub target_comp_id: String,
    /// Target SubID, empty when absent.
    pub target_sub_id: String,
}

impl SessionId {
    /// Creates a new session ID without sub IDs.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string (e.g., "FIX.4.2")
    /// * `sender_comp_id` - The sender CompID
    /// * `target_comp_id` - The target CompID
    #[must_use]
    pub fn new(
        begin_string: impl Into<String>,
        sender_comp_id: impl Into<String>,
        target_comp_id: impl Into<String>,
    ) -> Self {
        Self {
            begin_string: begin_string.into(),
            sender_comp_id: sender_comp_id.into(),
            sender_sub_id: String::new(),
            target_comp_id: target_comp_id.into(),
            target_sub_id: String::new(),
        }
    }

    /// Sets the sender sub ID.
    #[must_use]
    pub fn with_sender_sub_id(mut self, sub_id: impl Into<String>) -> Self {
        self.sender_sub_id = sub_id.into();
        self
    }

    /// Sets the target sub ID.
    #[must_use]
    pub fn with_target_sub_id(mut self, sub_id: impl Into<String>) -> Self {
        self.target_sub_id = sub_id.into();
        self
    }

    /// Returns true if the session uses the FIXT transport BeginString.
    #[must_use]
    pub fn is_fixt(&self) -> bool {
        self.begin_string == BEGIN_STRING_FIXT11
    }

    /// Returns the identity as seen from the counterparty's side.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            begin_string: self.begin_string.clone(),
            sender_comp_id: self.target_comp_id.clone(),
            sender_sub_id: self.target_sub_id.clone(),
            target_comp_id: self.sender_comp_id.clone(),
            target_sub_id: self.sender_sub_id.clone(),
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.begin_string, self.sender_comp_id)?;
        if !self.sender_sub_id.is_empty() {
            write!(f, "/{}", self.sender_sub_id)?;
        }
        write!(f, "->{}", self.target_comp_id)?;
        if !self.target_sub_id.is_empty() {
            write!(f, "/{}", self.target_sub_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_session_id() {
        let id = SessionId::new("FIX.4.4", "SENDER", "TARGET");
        assert_eq!(id.begin_string, "FIX.4.4");
        assert_eq!(id.sender_comp_id, "SENDER");
        assert_eq!(id.target_comp_id, "TARGET");
        assert!(id.sender_sub_id.is_empty());
        assert!(id.target_sub_id.is_empty());
        assert_eq!(id.to_string(), "FIX.4.4:SENDER->TARGET");
    }

    #[test]
    fn test_session_id_display_with_sub_ids() {
        let id = SessionId::new("FIX.4.2", "SENDER", "TARGET")
            .with_sender_sub_id("DESK1")
            .with_target_sub_id("ALGO");
        assert_eq!(id.to_string(), "FIX.4.2:SENDER/DESK1->TARGET/ALGO");
    }

    #[test]
    fn test_session_id_structural_equality() {
        let a = SessionId::new("FIX.4.2", "SENDER", "TARGET");
        let b = SessionId::new("FIX.4.2", "SENDER", "TARGET");
        let c = SessionId::new("FIX.4.2", "SENDER", "TARGET").with_target_sub_id("X");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<SessionId> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_session_id_reversed() {
        let id = SessionId::new("FIX.4.4", "SENDER", "TARGET").with_sender_sub_id("S1");
        let rev = id.reversed();
        assert_eq!(rev.sender_comp_id, "TARGET");
        assert_eq!(rev.target_comp_id, "SENDER");
        assert_eq!(rev.target_sub_id, "S1");
        assert_eq!(rev.reversed(), id);
    }

    #[test]
    fn test_session_id_is_fixt() {
        assert!(SessionId::new("FIXT.1.1", "A", "B").is_fixt());
        assert!(!SessionId::new("FIX.4.4", "A", "B").is_fixt());
    }

    #[test]
    fn test_session_id_serde() {
        let id = SessionId::new("FIX.4.4", "SENDER", "TARGET").with_target_sub_id("T1");
        let json = serde_json::to_string(&id).unwrap();
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
