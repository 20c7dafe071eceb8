//! Presence registry: who is online under which display name.
//!
//! The registry is owned by the relay task and mutated only from there, so it
//! carries no locking of its own.

use super::{
    entity::PresenceEntry,
    value_object::{ConnectionId, DisplayName},
};

/// Mapping from connection to display name, kept in join order.
#[derive(Debug, Default, Clone)]
pub struct PresenceRegistry {
    entries: Vec<PresenceEntry>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `connection`.
    ///
    /// Overwriting keeps the original join position.
    pub fn register(&mut self, connection: ConnectionId, name: DisplayName) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.connection == connection)
        {
            Some(entry) => entry.name = name,
            None => self.entries.push(PresenceEntry::new(connection, name)),
        }
    }

    /// Remove the entry for `connection` and return its name.
    ///
    /// Removing an unknown connection is a no-op.
    pub fn remove(&mut self, connection: &ConnectionId) -> Option<DisplayName> {
        let index = self
            .entries
            .iter()
            .position(|entry| &entry.connection == connection)?;
        Some(self.entries.remove(index).name)
    }

    pub fn name_of(&self, connection: &ConnectionId) -> Option<&DisplayName> {
        self.entries
            .iter()
            .find(|entry| &entry.connection == connection)
            .map(|entry| &entry.name)
    }

    /// Snapshot of all joined names in join order
    pub fn all_names(&self) -> Vec<DisplayName> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    /// First connection registered under `name`
    pub fn find_connection_by_name(&self, name: &str) -> Option<ConnectionId> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_str() == name)
            .map(|entry| entry.connection)
    }

    /// Whether `name` is held by a connection other than `connection`
    pub fn is_name_taken_by_other(&self, name: &DisplayName, connection: &ConnectionId) -> bool {
        self.entries
            .iter()
            .any(|entry| &entry.name == name && &entry.connection != connection)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
