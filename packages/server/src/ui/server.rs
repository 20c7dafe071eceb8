//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{GetRecentMessagesUseCase, PublishMessageUseCase, RelayHandle};

use super::{
    handler::{get_messages, health_check, post_message, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Chat relay server
///
/// This struct wires the use cases into an axum router and serves it.
///
/// # Example
///
/// ```ignore
/// let (relay, _relay_task) = spawn_relay(relay);
/// let server = Server::new(relay, get_recent_messages_usecase, publish_message_usecase);
/// server.run("127.0.0.1".to_string(), 5001).await?;
/// ```
pub struct Server {
    /// Relay へのイベント送信口
    relay: RelayHandle,
    /// GetRecentMessagesUseCase（履歴取得のユースケース）
    get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
    /// PublishMessageUseCase（HTTP 経由の投稿のユースケース）
    publish_message_usecase: Arc<PublishMessageUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        relay: RelayHandle,
        get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
        publish_message_usecase: Arc<PublishMessageUseCase>,
    ) -> Self {
        Self {
            relay,
            get_recent_messages_usecase,
            publish_message_usecase,
        }
    }

    /// Build the router with every endpoint
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            relay: self.relay,
            get_recent_messages_usecase: self.get_recent_messages_usecase,
            publish_message_usecase: self.publish_message_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/messages", get(get_messages).post(post_message))
            .route("/health", get(health_check))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the chat relay server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
