//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    command::ChatTarget,
    domain::{consecutive_failures, should_attempt_reconnect},
    error::ClientError,
    session::{SessionEnd, run_client_session},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client with reconnection logic
///
/// Each reconnect subscribes and joins again with the same username and room.
/// The attempt counter resets whenever a session gets past the handshake, so
/// the limit applies to consecutive failures.
pub async fn run_client(
    url: String,
    username: String,
    room: Option<String>,
) -> Result<(), ClientError> {
    let target = ChatTarget::new(username, room)?;
    let mut input_rx = spawn_readline(target.username().to_string());
    let mut reconnect_count = 0;

    loop {
        tracing::info!("Connecting to {} as '{}'", url, target.username());

        let (error, handshake_completed) =
            match run_client_session(&url, &target, &mut input_rx).await {
                Ok(SessionEnd::UserExit) => {
                    tracing::info!("Client session ended normally");
                    return Ok(());
                }
                Ok(SessionEnd::ConnectionLost(reason)) => {
                    (ClientError::ConnectionError(reason), true)
                }
                Err(e) => (e, false),
            };
        tracing::warn!("Connection lost: {}", error);

        reconnect_count = consecutive_failures(reconnect_count, handshake_completed);
        if !should_attempt_reconnect(&error, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(error);
        }
        reconnect_count += 1;

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            RECONNECT_INTERVAL_SECS,
            reconnect_count,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}

/// Spawn a blocking thread for rustyline (synchronous readline)
///
/// The thread outlives individual sessions so input keeps flowing across reconnects.
fn spawn_readline(username: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
