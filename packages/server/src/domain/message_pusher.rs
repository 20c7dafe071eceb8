//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを届けるためのインターフェース。
//! 具体的な送信手段（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::OutboundEvent, value_object::ConnectionId};

/// 1 接続分の送信チャンネル（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// Relay はこの trait にのみ依存し、ワイヤフォーマットや送信手段を知らない。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を送信先として登録
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// 接続を送信先から削除（未登録でもエラーにしない）
    async fn unregister_client(&self, connection: &ConnectionId);

    /// 登録済みの全ての接続 ID を取得
    async fn connected_clients(&self) -> Vec<ConnectionId>;

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
