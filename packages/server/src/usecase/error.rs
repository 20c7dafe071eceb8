//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Relay タスクとの通信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Relay タスクが停止している
    #[error("relay has stopped")]
    Closed,
}

/// HTTP 経由のメッセージ投稿エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}
