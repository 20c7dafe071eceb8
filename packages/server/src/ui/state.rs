//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetRecentMessagesUseCase, PublishMessageUseCase, RelayHandle};

/// Shared application state
pub struct AppState {
    /// Relay へのイベント送信口
    pub relay: RelayHandle,
    /// GetRecentMessagesUseCase（履歴取得のユースケース）
    pub get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
    /// PublishMessageUseCase（HTTP 経由の投稿のユースケース）
    pub publish_message_usecase: Arc<PublishMessageUseCase>,
}
