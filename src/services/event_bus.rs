//! Event bus for engine callbacks.
//!
//! Engines report from whatever thread they run on. Reports are queued here
//! and drained by the single owner of the session, so the sidebar is only
//! ever mutated from one context and needs no locks.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::types::engine::EngineEvent;

/// Cloneable, thread-safe handle engines use to post reports.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: UnboundedSender<EngineEvent>,
}

impl EventSender {
    /// Queues an event. Returns `false` when the session has shut down.
    pub fn post(&self, event: EngineEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(err) => {
                debug!(event = ?err.0, "Session gone, dropping engine event");
                false
            }
        }
    }
}

/// Receiving side, owned by the session's coordination context.
#[derive(Debug)]
pub struct EventBus {
    tx: UnboundedSender<EngineEvent>,
    rx: UnboundedReceiver<EngineEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Takes every event queued so far without blocking.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
