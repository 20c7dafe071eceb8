//! Domain layer: value objects, entities, presence registry, routing rules
//! and the interfaces the relay needs from the outside world.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod presence;
pub mod repository;
pub mod routing;
pub mod value_object;

pub use entity::{MessageRecord, PresenceEntry};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::OutboundEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use presence::PresenceRegistry;
pub use repository::MessageRepository;
pub use routing::{Delivery, route_message};
pub use value_object::{ConnectionId, DisplayName};
