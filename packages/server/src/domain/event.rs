//! Events the relay sends to connected clients.

use super::{
    entity::MessageRecord,
    value_object::{ConnectionId, DisplayName},
};

/// Server-to-client event, independent of the wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    UserJoined {
        name: DisplayName,
        connection: ConnectionId,
    },
    UserLeft {
        name: DisplayName,
        connection: ConnectionId,
    },
    /// Snapshot of every joined display name
    UsersList(Vec<DisplayName>),
    /// Recent records, oldest first
    MessageHistory(Vec<MessageRecord>),
    Message(MessageRecord),
    Typing {
        connection: ConnectionId,
        name: Option<DisplayName>,
    },
    StopTyping {
        connection: ConnectionId,
    },
}

impl OutboundEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserJoined { .. } => "userJoined",
            Self::UserLeft { .. } => "userLeft",
            Self::UsersList(_) => "usersList",
            Self::MessageHistory(_) => "messageHistory",
            Self::Message(_) => "message",
            Self::Typing { .. } => "typing",
            Self::StopTyping { .. } => "stopTyping",
        }
    }
}
