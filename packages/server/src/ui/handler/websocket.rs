//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId, infrastructure::dto::websocket::ServerFrame, ui::state::AppState,
};

use super::message::process_text;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: topic deliveries and private-queue
/// deliveries (via rx channel) are written to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (mut sender, mut receiver) = socket.split();

    // Tell the client which connection id the server assigned
    let connected = ServerFrame::Connected {
        connection_id: connection_id.to_string(),
    };
    let connected_json = match serde_json::to_string(&connected) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize connected frame: {}", e);
            return;
        }
    };
    if let Err(e) = sender.send(Message::Text(connected_json.into())).await {
        tracing::error!(
            "Failed to send connected frame to '{}': {}",
            connection_id,
            e
        );
        return;
    }

    // Register the connection as a delivery target
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_session_usecase
        .execute(connection_id.clone(), tx)
        .await;

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received frame from '{}': {}",
                        connection_id_clone,
                        text.as_str()
                    );
                    process_text(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to write deliveries to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_session_usecase
        .execute(&connection_id)
        .await
    {
        Some(message) => tracing::info!(
            "Connection '{}' closed, '{}' left",
            connection_id,
            message.sender()
        ),
        None => tracing::info!("Connection '{}' closed", connection_id),
    }
}
