//! Domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, DisplayName};

/// One chat message as persisted in the append-only log and fanned out live.
///
/// Immutable once created. `author` is absent when the sender never joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(rename = "username")]
    pub author: Option<DisplayName>,
    pub text: String,
    /// Server-assigned time of receipt
    pub timestamp: DateTime<Utc>,
    pub private: bool,
    /// Recipient name exactly as the sender wrote it
    pub recipient: Option<String>,
}

impl MessageRecord {
    pub fn new(
        author: Option<DisplayName>,
        text: String,
        timestamp: DateTime<Utc>,
        private: bool,
        recipient: Option<String>,
    ) -> Self {
        Self {
            author,
            text,
            timestamp,
            private,
            recipient,
        }
    }

    /// A non-private message addressed to everyone
    pub fn public(author: Option<DisplayName>, text: String, timestamp: DateTime<Utc>) -> Self {
        Self::new(author, text, timestamp, false, None)
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(DisplayName::as_str)
    }
}

/// Presence of one joined connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub connection: ConnectionId,
    pub name: DisplayName,
}

impl PresenceEntry {
    pub fn new(connection: ConnectionId, name: DisplayName) -> Self {
        Self { connection, name }
    }
}
