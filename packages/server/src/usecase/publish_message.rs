//! UseCase: HTTP 経由のメッセージ投稿（`POST /api/messages`）
//!
//! 入力を検証し、公開メッセージとして Relay に渡す。永続化と配信は
//! WebSocket からのメッセージと同じく Relay が行う。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PublishMessageUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：作者あり / 作者なしの投稿
//! - 異常系：空のテキスト、Relay 停止後の投稿
//! - エッジケース：空白のみのユーザー名は作者なしとして扱う

use crate::domain::{DisplayName, MessageRecord, ValueObjectError};

use super::{error::PublishError, event_loop::RelayHandle};

/// HTTP 経由のメッセージ投稿のユースケース
pub struct PublishMessageUseCase {
    relay: RelayHandle,
}

impl PublishMessageUseCase {
    /// 新しい PublishMessageUseCase を作成
    pub fn new(relay: RelayHandle) -> Self {
        Self { relay }
    }

    /// メッセージ投稿を実行
    ///
    /// # Returns
    ///
    /// * `Ok(MessageRecord)` - Relay が作成・配信したメッセージ
    /// * `Err(PublishError)` - 入力が不正、または Relay が停止している
    pub async fn execute(
        &self,
        username: Option<String>,
        text: String,
    ) -> Result<MessageRecord, PublishError> {
        if text.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessageText.into());
        }
        let author = username.and_then(|name| DisplayName::new(name).ok());

        let record = self.relay.publish(author, text).await?;
        tracing::info!(
            "Published message from '{}' via HTTP",
            record.author_name().unwrap_or("anonymous")
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::{ConnectionId, MessageRepository, OutboundEvent, PresenceRegistry},
        infrastructure::repository::InMemoryMessageRepository,
        usecase::{
            error::RelayError,
            event_loop::spawn_relay,
            relay::{DEFAULT_HISTORY_LIMIT, Relay},
            test_support::{RecordingPusher, fixed_clock, wait_for_records},
        },
    };
    use tokio::sync::mpsc;

    struct Fixture {
        usecase: PublishMessageUseCase,
        relay: RelayHandle,
        relay_task: tokio::task::JoinHandle<()>,
        pusher: Arc<RecordingPusher>,
        repository: Arc<InMemoryMessageRepository>,
    }

    fn setup() -> Fixture {
        let pusher = Arc::new(RecordingPusher::default());
        let repository = Arc::new(InMemoryMessageRepository::new());
        let (relay, relay_task) = spawn_relay(Relay::new(
            PresenceRegistry::new(),
            repository.clone(),
            pusher.clone(),
            fixed_clock(),
            DEFAULT_HISTORY_LIMIT,
        ));
        Fixture {
            usecase: PublishMessageUseCase::new(relay.clone()),
            relay,
            relay_task,
            pusher,
            repository,
        }
    }

    #[tokio::test]
    async fn test_execute_publishes_to_connected_clients() {
        // テスト項目: 投稿されたメッセージが接続中の全員に配信され、永続化される
        // given (前提条件):
        let fixture = setup();
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        fixture.relay.connect(connection, tx).unwrap();

        // when (操作):
        let record = fixture
            .usecase
            .execute(Some("  ci-bot ".to_string()), "build passed".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(record.author_name(), Some("ci-bot"));
        assert_eq!(record.text, "build passed");
        assert!(!record.private);
        assert_eq!(record.recipient, None);
        assert_eq!(
            fixture.pusher.events_for(&connection),
            vec![OutboundEvent::Message(record)]
        );
        wait_for_records(fixture.repository.as_ref(), 1).await;
    }

    #[tokio::test]
    async fn test_execute_with_blank_username_has_no_author() {
        // テスト項目: 空白のみのユーザー名は作者なしとして扱われる
        // given (前提条件):
        let fixture = setup();

        // when (操作):
        let record = fixture
            .usecase
            .execute(Some("   ".to_string()), "hello".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(record.author, None);
    }

    #[tokio::test]
    async fn test_execute_rejects_empty_text() {
        // テスト項目: 空のテキストは拒否され、何も永続化されない
        // given (前提条件):
        let fixture = setup();

        // when (操作):
        let result = fixture.usecase.execute(None, "  \n ".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PublishError::InvalidInput(ValueObjectError::EmptyMessageText))
        );
        assert_eq!(fixture.repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_execute_after_relay_stopped() {
        // テスト項目: Relay 停止後の投稿は Relay エラーになる
        // given (前提条件):
        let fixture = setup();
        fixture.relay_task.abort();
        let _ = fixture.relay_task.await;

        // when (操作):
        let result = fixture
            .usecase
            .execute(None, "anyone there?".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(PublishError::Relay(RelayError::Closed)));
    }
}
