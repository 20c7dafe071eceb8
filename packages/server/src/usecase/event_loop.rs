//! Single-consumer event queue driving the relay.
//!
//! WebSocket and HTTP handlers never touch the relay directly. They send
//! `RelayEvent`s through a cloneable `RelayHandle`; one task owns the `Relay`
//! and processes events strictly one at a time.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{ConnectionId, DisplayName, MessageRecord, PusherChannel};

use super::{error::RelayError, relay::Relay};

/// Inbound event for the relay
#[derive(Debug)]
pub enum RelayEvent {
    Connect {
        connection: ConnectionId,
        sender: PusherChannel,
    },
    Join {
        connection: ConnectionId,
        name: String,
    },
    Message {
        connection: ConnectionId,
        text: String,
        private: bool,
        recipient: Option<String>,
    },
    Typing {
        connection: ConnectionId,
    },
    StopTyping {
        connection: ConnectionId,
    },
    Disconnect {
        connection: ConnectionId,
    },
    /// Public message submitted over HTTP
    Publish {
        author: Option<DisplayName>,
        text: String,
        reply: oneshot::Sender<MessageRecord>,
    },
}

/// Cloneable sender side of the relay queue.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<RelayEvent>,
}

impl RelayHandle {
    /// Create a handle together with the receiving end of its queue.
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<RelayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn connect(&self, connection: ConnectionId, sender: PusherChannel) -> Result<(), RelayError> {
        self.send(RelayEvent::Connect { connection, sender })
    }

    pub fn join(&self, connection: ConnectionId, name: impl Into<String>) -> Result<(), RelayError> {
        self.send(RelayEvent::Join {
            connection,
            name: name.into(),
        })
    }

    pub fn message(
        &self,
        connection: ConnectionId,
        text: String,
        private: bool,
        recipient: Option<String>,
    ) -> Result<(), RelayError> {
        self.send(RelayEvent::Message {
            connection,
            text,
            private,
            recipient,
        })
    }

    pub fn typing(&self, connection: ConnectionId) -> Result<(), RelayError> {
        self.send(RelayEvent::Typing { connection })
    }

    pub fn stop_typing(&self, connection: ConnectionId) -> Result<(), RelayError> {
        self.send(RelayEvent::StopTyping { connection })
    }

    pub fn disconnect(&self, connection: ConnectionId) -> Result<(), RelayError> {
        self.send(RelayEvent::Disconnect { connection })
    }

    /// Submit a public message and wait for the record the relay built.
    pub async fn publish(
        &self,
        author: Option<DisplayName>,
        text: String,
    ) -> Result<MessageRecord, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayEvent::Publish {
            author,
            text,
            reply,
        })?;
        rx.await.map_err(|_| RelayError::Closed)
    }

    fn send(&self, event: RelayEvent) -> Result<(), RelayError> {
        self.tx.send(event).map_err(|_| RelayError::Closed)
    }
}

/// Spawn the relay task.
///
/// The task runs until every `RelayHandle` has been dropped. A panicking
/// handler is logged and the loop moves on to the next event.
pub fn spawn_relay(relay: Relay) -> (RelayHandle, JoinHandle<()>) {
    let (handle, mut rx) = RelayHandle::channel();

    let task = tokio::spawn(async move {
        let mut relay = relay;
        tracing::info!("Relay started");

        while let Some(event) = rx.recv().await {
            let result = AssertUnwindSafe(relay.handle(event)).catch_unwind().await;
            if let Err(panic) = result {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!("Relay event handler panicked: {}", reason);
            }
        }

        tracing::info!("Relay stopped");
    });

    (handle, task)
}
