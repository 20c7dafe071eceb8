//! UseCase: 直近のメッセージ履歴取得（`GET /api/messages`）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetRecentMessagesUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：件数上限を超える履歴から直近分を古い順で返す
//! - 異常系：ストアの読み込み失敗をそのまま返す

use std::sync::Arc;

use crate::domain::{MessageRecord, MessageRepository, RepositoryError};

/// 直近のメッセージ履歴取得のユースケース
pub struct GetRecentMessagesUseCase {
    /// Repository（Persistence Gateway の抽象化）
    repository: Arc<dyn MessageRepository>,
    /// 返す最大件数
    limit: usize,
}

impl GetRecentMessagesUseCase {
    /// 新しい GetRecentMessagesUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>, limit: usize) -> Self {
        Self { repository, limit }
    }

    /// 直近 `limit` 件を古い順で取得
    pub async fn execute(&self) -> Result<Vec<MessageRecord>, RepositoryError> {
        self.repository.recent(self.limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, repository::MockMessageRepository},
        infrastructure::repository::InMemoryMessageRepository,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn record(index: i64) -> MessageRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        MessageRecord::public(
            Some(DisplayName::new("alice").unwrap()),
            format!("message {}", index),
            base + Duration::seconds(index),
        )
    }

    #[tokio::test]
    async fn test_execute_returns_latest_records_oldest_first() {
        // テスト項目: 上限件数分の直近メッセージが古い順で返される
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::new());
        for index in 0..5 {
            repository.append(record(index)).await.unwrap();
        }
        let usecase = GetRecentMessagesUseCase::new(repository, 3);

        // when (操作):
        let result = usecase.execute().await.unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = result.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["message 2", "message 3", "message 4"]);
    }

    #[tokio::test]
    async fn test_execute_with_empty_store() {
        // テスト項目: メッセージがない場合は空のリストが返される
        // given (前提条件):
        let usecase =
            GetRecentMessagesUseCase::new(Arc::new(InMemoryMessageRepository::new()), 50);

        // when (操作):
        let result = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_execute_propagates_store_failure() {
        // テスト項目: ストアの失敗はエラーとして返される
        // given (前提条件):
        let mut repository = MockMessageRepository::new();
        repository
            .expect_recent()
            .withf(|limit| *limit == 50)
            .returning(|_| Err(RepositoryError::Unavailable("disk on fire".to_string())));
        let usecase = GetRecentMessagesUseCase::new(Arc::new(repository), 50);

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
    }
}
