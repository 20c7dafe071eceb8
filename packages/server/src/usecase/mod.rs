//! UseCase layer.
//!
//! - `relay`: Routing Relay（presence 管理とメッセージ配信）
//! - `event_loop`: Relay を単一コンシューマのタスクとして動かすイベントキュー
//! - `get_recent_messages` / `publish_message`: HTTP API 向けのユースケース

mod error;
mod event_loop;
mod get_recent_messages;
mod publish_message;
mod relay;
#[cfg(test)]
mod test_support;

pub use error::{PublishError, RelayError};
pub use event_loop::{RelayEvent, RelayHandle, spawn_relay};
pub use get_recent_messages::GetRecentMessagesUseCase;
pub use publish_message::PublishMessageUseCase;
pub use relay::{DEFAULT_HISTORY_LIMIT, Relay};
