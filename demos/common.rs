//! Common utilities shared across demos.

#![allow(dead_code)]

use std::env;

/// Default BeginString.
pub const DEFAULT_BEGIN_STRING: &str = "FIX.4.2";

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// BeginString for every session.
    pub begin_string: String,
    /// Our CompID.
    pub sender_comp_id: String,
    /// Counterparty CompIDs, one session each.
    pub target_comp_ids: Vec<String>,
    /// Orders sent to each counterparty.
    pub orders_per_target: usize,
}

impl DemoConfig {
    /// Reads the configuration from `FIX_BEGIN_STRING`, `FIX_SENDER`,
    /// `FIX_TARGETS` (comma separated) and `FIX_ORDERS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            begin_string: env::var("FIX_BEGIN_STRING")
                .unwrap_or_else(|_| DEFAULT_BEGIN_STRING.to_string()),
            sender_comp_id: env::var("FIX_SENDER").unwrap_or_else(|_| "ROUTER".to_string()),
            target_comp_ids: env::var("FIX_TARGETS")
                .unwrap_or_else(|_| "BROKER1,BROKER2".to_string())
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            orders_per_target: env::var("FIX_ORDERS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(3),
        }
    }
}

/// Initializes logging for demos.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Renders wire bytes with `|` in place of SOH.
pub fn printable(wire: &[u8]) -> String {
    String::from_utf8_lossy(wire).replace('\x01', "|")
}
