//! Hiroba chat relay server.
//!
//! Clients join over WebSocket with a display name, exchange public or private
//! messages and receive recent history on join.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --store messages.jsonl
//! ```

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    domain::{MessageRepository, PresenceRegistry},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{FileMessageRepository, InMemoryMessageRepository},
    },
    ui::Server,
    usecase::{
        DEFAULT_HISTORY_LIMIT, GetRecentMessagesUseCase, PublishMessageUseCase, Relay, spawn_relay,
    },
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Chat relay with presence, typing indicators and message history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5001")]
    port: u16,

    /// Number of recent messages replayed on join and served by the history API
    #[arg(long, env = "HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Append messages to this JSON-lines file instead of keeping them in memory
    #[arg(long, env = "MESSAGE_STORE")]
    store: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Relay
    // 4. UseCases
    // 5. Server

    // 1. Create Repository
    let repository: Arc<dyn MessageRepository> = match &args.store {
        Some(path) => {
            tracing::info!("Persisting messages to {}", path.display());
            Arc::new(FileMessageRepository::new(path.clone()))
        }
        None => {
            tracing::info!("Keeping messages in memory");
            Arc::new(InMemoryMessageRepository::new())
        }
    };

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Start the Relay
    let relay = Relay::new(
        PresenceRegistry::new(),
        repository.clone(),
        message_pusher,
        Arc::new(SystemClock),
        args.history_limit,
    );
    let (relay_handle, _relay_task) = spawn_relay(relay);

    // 4. Create UseCases
    let get_recent_messages_usecase = Arc::new(GetRecentMessagesUseCase::new(
        repository,
        args.history_limit,
    ));
    let publish_message_usecase = Arc::new(PublishMessageUseCase::new(relay_handle.clone()));

    // 5. Create and run the server
    let server = Server::new(
        relay_handle,
        get_recent_messages_usecase,
        publish_message_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
