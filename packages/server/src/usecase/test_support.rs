//! UseCase テスト用のヘルパー

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use hiroba_shared::time::{Clock, FixedClock};

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, MessageRepository, OutboundEvent,
    PusherChannel,
};

/// 送信されたイベントを接続ごとに記録する MessagePusher
#[derive(Default)]
pub struct RecordingPusher {
    connected: Mutex<HashSet<ConnectionId>>,
    inbox: Mutex<HashMap<ConnectionId, Vec<OutboundEvent>>>,
}

impl RecordingPusher {
    pub fn events_for(&self, connection: &ConnectionId) -> Vec<OutboundEvent> {
        self.inbox
            .lock()
            .unwrap()
            .get(connection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_history(&self, connection: &ConnectionId) -> bool {
        self.events_for(connection)
            .iter()
            .any(|event| matches!(event, OutboundEvent::MessageHistory(_)))
    }

    pub fn is_connected(&self, connection: &ConnectionId) -> bool {
        self.connected.lock().unwrap().contains(connection)
    }

    pub fn clear(&self) {
        self.inbox.lock().unwrap().clear();
    }

    fn record(&self, connection: ConnectionId, event: &OutboundEvent) {
        self.inbox
            .lock()
            .unwrap()
            .entry(connection)
            .or_default()
            .push(event.clone());
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection: ConnectionId, _sender: PusherChannel) {
        self.connected.lock().unwrap().insert(connection);
    }

    async fn unregister_client(&self, connection: &ConnectionId) {
        self.connected.lock().unwrap().remove(connection);
    }

    async fn connected_clients(&self) -> Vec<ConnectionId> {
        self.connected.lock().unwrap().iter().copied().collect()
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        if !self.is_connected(connection) {
            return Err(MessagePushError::ClientNotFound(connection.to_string()));
        }
        self.record(*connection, event);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        for target in targets {
            if self.is_connected(&target) {
                self.record(target, event);
            }
        }
        Ok(())
    }
}

/// テスト用の固定時刻（2023-01-01T00:00:00Z）
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::from_millis(1_672_531_200_000))
}

/// 条件が満たされるまで最大 1 秒待つ
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition was not met within 1s");
}

/// リポジトリに `expected` 件のメッセージが保存されるまで最大 1 秒待つ
pub async fn wait_for_records(repository: &dyn MessageRepository, expected: usize) {
    for _ in 0..100 {
        if repository.count().await.unwrap() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("repository did not reach {} records within 1s", expected);
}
