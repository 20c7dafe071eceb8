//! UseCase: Routing Relay
//!
//! 受信イベントを Presence Registry の更新と配信（全員 / 特定の接続 /
//! 送信者以外）に変換し、全てのチャットメッセージを永続化する。
//!
//! Relay は `event_loop` の単一タスクからのみ呼ばれるため、Registry は
//! ロックなしで `&mut self` 経由で更新される。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - join / message / typing / stopTyping / disconnect の各ハンドラ
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加、公開メッセージ、プライベートメッセージ、切断
//! - 異常系：空の名前、重複した名前、宛先不明、永続化の失敗
//! - エッジケース：join 前の送信・切断、自分宛てのプライベートメッセージ

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ConnectionId, Delivery, DisplayName, MessagePusher, MessageRecord, MessageRepository,
    OutboundEvent, PresenceRegistry, PusherChannel, route_message,
};

use super::event_loop::RelayEvent;

/// Number of records replayed to a joining client
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Routing Relay
pub struct Relay {
    /// Presence Registry（Relay が排他的に所有する）
    registry: PresenceRegistry,
    /// Repository（Persistence Gateway の抽象化）
    repository: Arc<dyn MessageRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    history_limit: usize,
}

impl Relay {
    /// 新しい Relay を作成
    pub fn new(
        registry: PresenceRegistry,
        repository: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        history_limit: usize,
    ) -> Self {
        Self {
            registry,
            repository,
            message_pusher,
            clock,
            history_limit,
        }
    }

    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// イベントを 1 件処理
    pub async fn handle(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Connect { connection, sender } => self.on_connect(connection, sender).await,
            RelayEvent::Join { connection, name } => self.on_join(connection, &name).await,
            RelayEvent::Message {
                connection,
                text,
                private,
                recipient,
            } => {
                self.on_message(connection, text, private, recipient).await;
            }
            RelayEvent::Typing { connection } => self.on_typing(connection).await,
            RelayEvent::StopTyping { connection } => self.on_stop_typing(connection).await,
            RelayEvent::Disconnect { connection } => self.on_disconnect(connection).await,
            RelayEvent::Publish {
                author,
                text,
                reply,
            } => {
                let record = self.on_publish(author, text).await;
                if reply.send(record).is_err() {
                    tracing::debug!("Publisher went away before receiving its record");
                }
            }
        }
    }

    /// 接続を送信先として登録する。接続は join するまで匿名のまま。
    pub async fn on_connect(&mut self, connection: ConnectionId, sender: PusherChannel) {
        self.message_pusher.register_client(connection, sender).await;
        tracing::info!("Connection '{}' opened", connection);
    }

    /// 表示名を登録し、参加通知・参加者リスト・履歴を送る
    pub async fn on_join(&mut self, connection: ConnectionId, name: &str) {
        let Ok(name) = DisplayName::new(name) else {
            tracing::warn!("Ignoring join with empty name from '{}'", connection);
            return;
        };

        if self.registry.is_name_taken_by_other(&name, &connection) {
            tracing::warn!(
                "Ignoring join from '{}': name '{}' is already in use",
                connection,
                name
            );
            return;
        }

        self.registry.register(connection, name.clone());
        tracing::info!("Connection '{}' joined as '{}'", connection, name);

        self.deliver(
            Delivery::All,
            &OutboundEvent::UserJoined { name, connection },
        )
        .await;
        self.deliver(
            Delivery::All,
            &OutboundEvent::UsersList(self.registry.all_names()),
        )
        .await;
        self.send_history(connection);
    }

    /// チャットメッセージを記録・永続化し、ルーティング規則に従って配信する
    pub async fn on_message(
        &mut self,
        connection: ConnectionId,
        text: String,
        private: bool,
        recipient: Option<String>,
    ) -> MessageRecord {
        let author = self.registry.name_of(&connection).cloned();
        if author.is_none() {
            tracing::debug!("Message from '{}' which has not joined", connection);
        }
        let record = MessageRecord::new(author, text, self.clock.now(), private, recipient);

        self.persist(record.clone());

        let delivery = route_message(&self.registry, &connection, &record);
        if delivery == Delivery::Nobody {
            tracing::info!(
                "Dropping private message from '{}': recipient is not online",
                connection
            );
        }
        self.deliver(delivery, &OutboundEvent::Message(record.clone()))
            .await;

        record
    }

    pub async fn on_typing(&mut self, connection: ConnectionId) {
        let name = self.registry.name_of(&connection).cloned();
        self.deliver(
            Delivery::AllExcept(connection),
            &OutboundEvent::Typing { connection, name },
        )
        .await;
    }

    pub async fn on_stop_typing(&mut self, connection: ConnectionId) {
        self.deliver(
            Delivery::AllExcept(connection),
            &OutboundEvent::StopTyping { connection },
        )
        .await;
    }

    /// 接続を削除し、参加済みだった場合のみ退出通知と参加者リストを送る
    pub async fn on_disconnect(&mut self, connection: ConnectionId) {
        self.message_pusher.unregister_client(&connection).await;

        let Some(name) = self.registry.remove(&connection) else {
            tracing::info!("Connection '{}' closed before joining", connection);
            return;
        };
        tracing::info!("Connection '{}' ('{}') left", connection, name);

        self.deliver(
            Delivery::All,
            &OutboundEvent::UserLeft { name, connection },
        )
        .await;
        self.deliver(
            Delivery::All,
            &OutboundEvent::UsersList(self.registry.all_names()),
        )
        .await;
    }

    /// HTTP 経由の公開メッセージを永続化し、全員に配信する
    pub async fn on_publish(&mut self, author: Option<DisplayName>, text: String) -> MessageRecord {
        let record = MessageRecord::public(author, text, self.clock.now());
        self.persist(record.clone());
        self.deliver(Delivery::All, &OutboundEvent::Message(record.clone()))
            .await;
        record
    }

    /// Fire-and-forget で永続化する。失敗はログのみ。
    fn persist(&self, record: MessageRecord) {
        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(e) = repository.append(record).await {
                tracing::error!("Error saving message: {}", e);
            }
        });
    }

    /// 直近の履歴を join した接続にだけ送る。ストアの応答はイベントループを止めない。
    fn send_history(&self, connection: ConnectionId) {
        let repository = Arc::clone(&self.repository);
        let message_pusher = Arc::clone(&self.message_pusher);
        let limit = self.history_limit;
        tokio::spawn(async move {
            let records = match repository.recent(limit).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("Error fetching message history: {}", e);
                    return;
                }
            };
            let count = records.len();
            match message_pusher
                .push_to(&connection, &OutboundEvent::MessageHistory(records))
                .await
            {
                Ok(()) => tracing::debug!("Sent {} history records to '{}'", count, connection),
                Err(e) => tracing::warn!("Failed to send history to '{}': {}", connection, e),
            }
        });
    }

    async fn deliver(&self, delivery: Delivery, event: &OutboundEvent) {
        let targets = match delivery {
            Delivery::All => self.message_pusher.connected_clients().await,
            Delivery::AllExcept(origin) => self
                .message_pusher
                .connected_clients()
                .await
                .into_iter()
                .filter(|connection| connection != &origin)
                .collect(),
            Delivery::Only(targets) => targets,
            Delivery::Nobody => return,
        };

        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to deliver '{}': {}", event.name(), e);
        }
    }
}
