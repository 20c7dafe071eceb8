//! MessageRepository の実装
//!
//! - `inmemory`: プロセス内の Vec を使った実装（再起動で消える）
//! - `file`: JSON Lines 形式の追記専用ファイルを使った実装

pub mod file;
pub mod inmemory;

pub use file::FileMessageRepository;
pub use inmemory::InMemoryMessageRepository;

use crate::domain::MessageRecord;

/// 古い順に並んだ `records` から直近 `limit` 件を取り出す
pub(crate) fn tail(records: &[MessageRecord], limit: usize) -> Vec<MessageRecord> {
    let start = records.len().saturating_sub(limit);
    records[start..].to_vec()
}
