//! Repository trait 定義
//!
//! メッセージログ（Persistence Gateway）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{entity::MessageRecord, error::RepositoryError};

/// Message Repository trait
///
/// 追記専用のメッセージログ。更新・削除は存在しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージをログの末尾に追記
    async fn append(&self, record: MessageRecord) -> Result<(), RepositoryError>;

    /// 直近 `limit` 件のメッセージを古い順で取得
    async fn recent(&self, limit: usize) -> Result<Vec<MessageRecord>, RepositoryError>;

    /// 保存済みメッセージ数を取得
    async fn count(&self) -> Result<usize, RepositoryError>;
}
