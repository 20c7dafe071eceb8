//! Routing rules for chat messages.
//!
//! Pure functions deciding who receives a message, so the rules can be
//! tested without any transport.

use super::{entity::MessageRecord, presence::PresenceRegistry, value_object::ConnectionId};

/// Set of connections an event is delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Every connected client, including the origin
    All,
    /// Every connected client except the given one
    AllExcept(ConnectionId),
    /// Exactly these connections, each at most once
    Only(Vec<ConnectionId>),
    /// Nobody
    Nobody,
}

/// Decide the recipients of `record` sent by `sender`.
///
/// Private messages go to the resolved recipient plus an echo to the sender.
/// A private flag without a recipient is treated as public. A recipient
/// that names nobody online drops the message.
pub fn route_message(
    registry: &PresenceRegistry,
    sender: &ConnectionId,
    record: &MessageRecord,
) -> Delivery {
    let recipient = match record.recipient.as_deref() {
        Some(name) if record.private && !name.is_empty() => name,
        _ => return Delivery::All,
    };

    match registry.find_connection_by_name(recipient.trim()) {
        Some(recipient) if &recipient == sender => Delivery::Only(vec![recipient]),
        Some(recipient) => Delivery::Only(vec![recipient, *sender]),
        None => Delivery::Nobody,
    }
}
