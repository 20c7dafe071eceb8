//! InMemory Message Repository 実装
//!
//! ドメイン層が定義する MessageRepository trait の具体的な実装。
//! Vec を追記専用ログとして使用します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessageRecord, MessageRepository, RepositoryError};

use super::super::tail;

/// インメモリ Message Repository 実装
#[derive(Default, Clone)]
pub struct InMemoryMessageRepository {
    /// 受信時刻順に並んだメッセージ
    records: Arc<Mutex<Vec<MessageRecord>>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, record: MessageRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        // 並行した追記が前後しても時刻順を保つ（同時刻は追記順）
        let index = records.partition_point(|existing| existing.timestamp <= record.timestamp);
        records.insert(index, record);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<MessageRecord>, RepositoryError> {
        let records = self.records.lock().await;
        Ok(tail(&records, limit))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records.len())
    }
}
