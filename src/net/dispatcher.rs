use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::net::messages::{ClientMessage, ServerMessage};
use crate::state::hub::{Command, Hub, OutboundMessage};

/// Shared entry point for every connection task and the tick task.
///
/// Nothing here mutates the world directly: sessions only enqueue commands
/// on the hub, and the tick drains them before stepping the simulation.
#[derive(Clone)]
pub struct DispatcherHandle {
    inner: Arc<Mutex<Dispatcher>>,
}

impl DispatcherHandle {
    pub fn new(hub: Hub) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Dispatcher::new(hub))),
        }
    }

    /// A new websocket session: remember its outbound channel and queue
    /// the snake spawn for the next tick.
    pub async fn register_session(&self, session_id: u64, outbound_tx: mpsc::Sender<ServerMessage>) {
        let mut guard = self.inner.lock().await;
        guard.sessions.insert(session_id, outbound_tx);
        guard.hub.enqueue(Command::Connect { session_id });
    }

    pub async fn unregister_session(&self, session_id: u64) {
        let mut guard = self.inner.lock().await;
        guard.sessions.remove(&session_id);
        guard.hub.enqueue(Command::Disconnect { session_id });
    }

    pub async fn handle_inbound(&self, session_id: u64, message: ClientMessage) {
        let mut guard = self.inner.lock().await;
        guard.hub.enqueue_message(session_id, message);
    }

    /// Deliver one message to its session. The sender is cloned out of the
    /// lock first: a backed-up client blocks only its own send, never the
    /// tick or the other sessions.
    pub async fn send_outbound(&self, outbound: OutboundMessage) {
        let tx = {
            let guard = self.inner.lock().await;
            guard.sessions.get(&outbound.session_id).cloned()
        };
        if let Some(tx) = tx {
            let _ = tx.send(outbound.message).await;
        }
    }

    pub async fn tick(&self) -> Vec<OutboundMessage> {
        let mut guard = self.inner.lock().await;
        guard.hub.tick()
    }
}

struct Dispatcher {
    hub: Hub,
    sessions: HashMap<u64, mpsc::Sender<ServerMessage>>,
}

impl Dispatcher {
    fn new(hub: Hub) -> Self {
        Self {
            hub,
            sessions: HashMap::new(),
        }
    }
}
