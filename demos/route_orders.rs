//! Order Routing Demo
//!
//! This demo wires a session directory to channel-backed sessions:
//! - One `QueuedSession` per counterparty, drained by its own writer thread
//! - Orders routed by header through `SessionRegistry::send`
//! - A decoded wire message routed without re-encoding by hand
//! - An out-of-band reject and an order for an unknown counterparty
//! - Explicit teardown with `SessionRegistry::clear`

use std::sync::Arc;
use std::thread;

use crossbeam_channel::Receiver;
use tracing::{error, info, warn};

use fixroute::prelude::*;

mod common;
use common::{DemoConfig, init_logging, printable};

/// Drains one session's queue, framing each message as it would hit the wire.
fn writer(session_id: SessionId, outbound: Receiver<Outbound>) {
    for item in outbound {
        match item {
            Outbound::Message(msg) => match msg.to_bytes() {
                Ok(wire) => info!("{} <- {}", session_id, printable(&wire)),
                Err(e) => error!("{}: cannot frame message: {}", session_id, e),
            },
            Outbound::Reject { message, reject } => {
                let msg_type = message.msg_type().unwrap_or("?");
                warn!("{} rejecting {}: {}", session_id, msg_type, reject);
            }
        }
    }
    info!("{} writer stopped", session_id);
}

fn new_order(cfg: &DemoConfig, target: &str, cl_ord_id: &str) -> Message {
    let mut msg = Message::new();
    msg.header
        .set_str(tags::BEGIN_STRING, &cfg.begin_string)
        .set_str(tags::MSG_TYPE, "D")
        .set_str(tags::SENDER_COMP_ID, &cfg.sender_comp_id)
        .set_str(tags::TARGET_COMP_ID, target);
    msg.body
        .set_str(Tag::new(11), cl_ord_id)
        .set_str(Tag::new(55), "EURUSD")
        .set_str(Tag::new(54), "1")
        .set_int(Tag::new(38), 1_000_000);
    msg
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cfg = DemoConfig::from_env();
    info!(
        "Routing {} orders to each of {:?} as {}",
        cfg.orders_per_target, cfg.target_comp_ids, cfg.sender_comp_id
    );

    let registry = Arc::new(SessionRegistry::with_config(
        RegistryConfig::new().with_initial_capacity(cfg.target_comp_ids.len()),
    ));

    let mut writers = Vec::new();
    for target in &cfg.target_comp_ids {
        let session_id =
            SessionId::new(cfg.begin_string.as_str(), cfg.sender_comp_id.as_str(), target.as_str());
        let (session, outbound) = QueuedSession::new(session_id.clone());
        registry.register(Arc::new(session))?;
        writers.push(thread::spawn(move || writer(session_id, outbound)));
    }

    let producers: Vec<_> = cfg
        .target_comp_ids
        .iter()
        .cloned()
        .map(|target| {
            let registry = Arc::clone(&registry);
            let cfg = cfg.clone();
            thread::spawn(move || -> Result<()> {
                for n in 0..cfg.orders_per_target {
                    registry.send(new_order(&cfg, &target, &format!("{target}-{n}")))?;
                }
                Ok(())
            })
        })
        .collect();
    for producer in producers {
        if let Err(e) = producer.join().map_err(|_| "producer panicked")? {
            error!("Producer failed: {}", e);
        }
    }

    if let Some(target) = cfg.target_comp_ids.first() {
        let wire = new_order(&cfg, target, "FROM-WIRE").to_bytes()?;
        let raw = Decoder::new(&wire).decode()?;
        info!("Decoded {} byte {} message", raw.len(), raw.msg_type()?);
        registry.send(raw)?;

        let session_id =
            SessionId::new(cfg.begin_string.as_str(), cfg.sender_comp_id.as_str(), target.as_str());
        let mut bad = new_order(&cfg, target, "BAD-SIDE");
        bad.body.set_str(Tag::new(54), "Z");
        registry.send_reject(
            bad,
            &session_id,
            MessageRejectError::value_is_incorrect(Tag::new(54)),
        )?;
    }

    match registry.send(new_order(&cfg, "NOBODY", "LOST-1")) {
        Err(FixError::Session(SessionError::UnknownSession(id))) => {
            warn!("No route to {}", id);
        }
        other => error!("Unexpected routing result: {:?}", other),
    }

    info!("Shutting down {} sessions", registry.clear());
    for handle in writers {
        let _ = handle.join();
    }
    Ok(())
}
