/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Session directory configuration.

/// Configuration for a [`SessionRegistry`](crate::SessionRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Whether `send` fails when the header has no SenderCompID (49).
    ///
    /// When `false`, such a message is dropped and `send` returns `Ok(())`.
    pub require_sender_comp_id: bool,
    /// Number of sessions the table is sized for up front.
    pub initial_capacity: usize,
}

impl RegistryConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_sender_comp_id: false,
            initial_capacity: 16,
        }
    }

    /// Sets whether a missing SenderCompID is an error.
    #[must_use]
    pub const fn with_require_sender_comp_id(mut self, require: bool) -> Self {
        self.require_sender_comp_id = require;
        self
    }

    /// Sets the initial table capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
