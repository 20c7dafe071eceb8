//! File Message Repository 実装
//!
//! 1 行 1 メッセージの JSON Lines ファイルを追記専用ログとして使用します。
//! 読み込み時に壊れた行はスキップします（書き込み途中でのクラッシュ対策）。

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

use crate::domain::{MessageRecord, MessageRepository, RepositoryError};

use super::super::tail;

/// JSON Lines ファイルを使った Message Repository 実装
pub struct FileMessageRepository {
    path: PathBuf,
    /// 同一プロセス内の追記と読み込みを直列化する
    lock: Mutex<()>,
}

impl FileMessageRepository {
    /// 新しい FileMessageRepository を作成（ファイルは最初の追記時に作成される）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<MessageRecord>, RepositoryError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<MessageRecord> = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(
                |(number, line)| match serde_json::from_str::<MessageRecord>(line) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(
                            "Skipping malformed record at {}:{}: {}",
                            self.path.display(),
                            number + 1,
                            e
                        );
                        None
                    }
                },
            )
            .collect();

        // 並行した追記で行が前後しても時刻順に揃える（安定ソート）
        records.sort_by_key(|record| record.timestamp);
        Ok(records)
    }
}

#[async_trait]
impl MessageRepository for FileMessageRepository {
    async fn append(&self, record: MessageRecord) -> Result<(), RepositoryError> {
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self.lock.lock().await;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<MessageRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let records = self.read_all().await?;
        Ok(tail(&records, limit))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.len())
    }
}
