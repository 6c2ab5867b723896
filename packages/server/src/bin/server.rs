//! WebSocket chat server with public, room and private messaging.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-server
//! cargo run --bin agora-server -- --host 0.0.0.0 --port 3000 --room general --room random
//! ```

use std::sync::Arc;

use agora_server::ui::{AppState, Server};
use agora_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agora-server")]
#[command(about = "WebSocket chat server with public, room and private messaging", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,

    /// Room to create at startup (repeatable)
    #[arg(short = 'r', long = "room")]
    rooms: Vec<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Registries, MessagePusher and UseCases
    let state = Arc::new(AppState::new(Arc::new(SystemClock)));

    for name in args.rooms {
        match state.create_room_usecase.execute(name.clone()).await {
            Ok(room) => tracing::info!("Room '{}' created with id {}", room.name, room.id),
            Err(e) => {
                tracing::error!("Cannot create room '{}': {}", name, e);
                std::process::exit(1);
            }
        }
    }

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
