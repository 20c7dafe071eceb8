//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::{RelayError, RelayHandle},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the socket.
///
/// The task ends when the relay drops the channel (after disconnect) or when
/// a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state.relay.connect(connection, tx) {
        tracing::error!("Cannot accept connection '{}': {}", connection, e);
        return;
    }

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let relay = state.relay.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if dispatch(&relay, connection, text.as_str()).is_err() {
                        break;
                    }
                }
                Message::Close(_) => break,
                // ping/pong は axum が処理し、バイナリは無視する
                _ => {}
            }
        }
    });

    // どちらかのタスクが終了したら、もう一方も終了させる
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    if let Err(e) = state.relay.disconnect(connection) {
        tracing::warn!("Failed to report disconnect of '{}': {}", connection, e);
    }
    tracing::info!("Connection '{}' closed", connection);
}

/// Parse one text frame and forward it to the relay.
///
/// Frames that do not parse are logged and ignored.
fn dispatch(relay: &RelayHandle, connection: ConnectionId, text: &str) -> Result<(), RelayError> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection, e);
            return Ok(());
        }
    };

    match event {
        ClientEvent::Join(name) => relay.join(connection, name),
        ClientEvent::Message(message) => relay.message(
            connection,
            message.text,
            message.private.unwrap_or(false),
            message.recipient,
        ),
        ClientEvent::Typing => relay.typing(connection),
        ClientEvent::StopTyping => relay.stop_typing(connection),
    }
}
