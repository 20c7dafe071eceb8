//! Real-time chat relay server library.
//!
//! Clients join with a display name, exchange broadcast or private messages
//! through a single relay, and receive recent history from an append-only log.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
