//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Display name is empty after trimming whitespace
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// Message text is empty after trimming whitespace
    #[error("message text must not be empty")]
    EmptyMessageText,
}

/// Errors raised by a message repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage I/O failed
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded
    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store cannot serve requests right now
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised when pushing events to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The target connection is not registered
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),

    /// The outbound channel of the connection is closed
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// The event could not be encoded for the wire
    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}
