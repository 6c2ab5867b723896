//! WebSocket client session management.

use agora_server::infrastructure::dto::websocket::{ClientFrame, ServerFrame};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::{ChatTarget, InputCommand},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// How a session ended after the handshake completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// `/quit` or end of input
    UserExit,
    /// The connection dropped after the server accepted it
    ConnectionLost(String),
}

/// Run one WebSocket client session
///
/// Subscribes and joins right after connecting, then forwards input lines
/// until the user quits or the connection drops. Failures before the
/// `connected` frame arrives are returned as `Err`.
pub async fn run_client_session(
    url: &str,
    target: &ChatTarget,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let (mut write, mut read) = ws_stream.split();

    // The server announces the connection id first
    let connection_id = match read.next().await {
        Some(Ok(Message::Text(text))) => match serde_json::from_str::<ServerFrame>(text.as_str()) {
            Ok(ServerFrame::Connected { connection_id }) => connection_id,
            _ => {
                return Err(ClientError::ProtocolError(format!(
                    "expected connected frame, got {}",
                    text.as_str()
                )));
            }
        },
        Some(Ok(other)) => {
            return Err(ClientError::ProtocolError(format!(
                "expected connected frame, got {:?}",
                other
            )));
        }
        Some(Err(e)) => return Err(ClientError::ConnectionError(e.to_string())),
        None => {
            return Err(ClientError::ConnectionError(
                "Connection closed before handshake".to_string(),
            ));
        }
    };
    tracing::info!("Connected to chat server (connection id: {})", connection_id);

    for destination in target.subscriptions() {
        send(&mut write, &ClientFrame::Subscribe { destination }).await?;
    }
    send(&mut write, &target.join_frame()?).await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /dm <user> <text> for private messages, /quit to exit.\n",
        target.username()
    );
    redisplay_prompt(target.username());

    // Spawn a task to handle incoming frames
    let username_for_read = target.username().to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerFrame>(text.as_str()) {
                        Ok(ServerFrame::Message { destination, body }) => {
                            MessageFormatter::format_delivery(&destination, &body)
                        }
                        _ => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&username_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let outcome = loop {
        tokio::select! {
            _ = &mut read_task => {
                break Ok(SessionEnd::ConnectionLost("Connection lost".to_string()));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Input closed (Ctrl+C / Ctrl+D)
                    break Ok(SessionEnd::UserExit);
                };
                let command = match InputCommand::parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(target.username());
                        continue;
                    }
                };
                let frame = match target.frame_for(&command) {
                    Ok(Some(frame)) => frame,
                    Ok(None) => break Ok(SessionEnd::UserExit),
                    Err(e) => break Err(e),
                };
                match send(&mut write, &frame).await {
                    Ok(()) => {}
                    Err(ClientError::ConnectionError(reason)) => {
                        break Ok(SessionEnd::ConnectionLost(reason));
                    }
                    Err(e) => break Err(e),
                }
            }
        }
    };

    read_task.abort();
    if matches!(outcome, Ok(SessionEnd::UserExit)) {
        let _ = write.send(Message::Close(None)).await;
    }
    outcome
}

async fn send<S>(write: &mut S, frame: &ClientFrame) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    <S as Sink<Message>>::Error: std::fmt::Display,
{
    let json =
        serde_json::to_string(frame).map_err(|e| ClientError::ProtocolError(e.to_string()))?;
    write
        .send(Message::text(json))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
