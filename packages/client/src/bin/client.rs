//! Terminal chat client with reconnection support.
//!
//! Joins the public chat (or a room), sends typed lines as chat messages and
//! `/dm <user> <text>` as private messages. Reconnects on disconnection
//! (max 5 attempts with 5 second interval), joining again each time.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-client -- --username alice
//! cargo run --bin agora-client -- -n bob --room 3f1c...
//! ```

use clap::Parser;

use agora_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "agora-client")]
#[command(about = "Terminal chat client for the Agora chat server", long_about = None)]
struct Args {
    /// Username shown to other users
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Room id to join instead of the public chat
    #[arg(short = 'r', long)]
    room: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = agora_client::run_client(args.url, args.username, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
