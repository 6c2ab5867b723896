//! Inbound frame handling.
//!
//! Parses a text frame, applies subscriptions and routes `send` frames to the
//! matching use case. Any failure, including a panic inside a handler, is
//! reported to the originating connection on `/user/queue/errors`.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde::de::DeserializeOwned;

use crate::{
    domain::{
        ConnectionId, ErrorNotice, MessageContent, OutboundMessage, Topic, UserQueue, Username,
    },
    infrastructure::dto::websocket::{
        ChatMessagePayload, ClientFrame, JoinPayload, MessageType, PrivateMessagePayload,
    },
    ui::{dispatch::AppRoute, error::RouteError, state::AppState},
};

/// Process one text frame from a connection
pub async fn process_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let outcome = AssertUnwindSafe(handle_text(state, connection_id, text))
        .catch_unwind()
        .await;

    let error = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e,
        Err(_) => {
            tracing::error!(
                "Handler panicked while processing a frame from '{}'",
                connection_id
            );
            RouteError::Internal
        }
    };
    report_error(state, connection_id, &error).await;
}

async fn handle_text(
    state: &AppState,
    connection_id: &ConnectionId,
    text: &str,
) -> Result<(), RouteError> {
    let frame = serde_json::from_str::<ClientFrame>(text)
        .map_err(|e| RouteError::InvalidFrame(e.to_string()))?;

    match frame {
        ClientFrame::Subscribe { destination } => {
            if is_user_queue(&destination) {
                // 個人宛キューは購読なしで常に配送される
                return Ok(());
            }
            let topic = parse_topic(&destination)?;
            tracing::debug!("Connection '{}' subscribed to {}", connection_id, destination);
            state.message_pusher.subscribe(connection_id, topic).await;
            Ok(())
        }
        ClientFrame::Unsubscribe { destination } => {
            if is_user_queue(&destination) {
                return Ok(());
            }
            let topic = parse_topic(&destination)?;
            tracing::debug!(
                "Connection '{}' unsubscribed from {}",
                connection_id,
                destination
            );
            state.message_pusher.unsubscribe(connection_id, &topic).await;
            Ok(())
        }
        ClientFrame::Send { destination, body } => {
            let route = state
                .destinations
                .resolve(&destination)
                .ok_or(RouteError::UnknownDestination(destination))?;
            route_send(state, connection_id, route, body).await
        }
    }
}

async fn route_send(
    state: &AppState,
    connection_id: &ConnectionId,
    route: AppRoute,
    body: serde_json::Value,
) -> Result<(), RouteError> {
    match route {
        AppRoute::SendPublic => {
            let (sender, content) = chat_payload(body)?;
            state.send_message_usecase.execute(sender, content).await?;
        }
        AppRoute::SendRoom(room_id) => {
            let (sender, content) = chat_payload(body)?;
            state
                .send_message_usecase
                .execute_in_room(room_id, sender, content)
                .await?;
        }
        AppRoute::JoinPublic => {
            let payload: JoinPayload = parse_body(body)?;
            state
                .join_chat_usecase
                .execute(connection_id, Username::new(payload.sender)?, None)
                .await?;
        }
        AppRoute::JoinRoom(room_id) => {
            let payload: JoinPayload = parse_body(body)?;
            state
                .join_chat_usecase
                .execute(connection_id, Username::new(payload.sender)?, Some(room_id))
                .await?;
        }
        AppRoute::SendPrivate => {
            let payload: PrivateMessagePayload = parse_body(body)?;
            let recipient = Username::new(payload.recipient)?;
            let content = MessageContent::new(payload.content)?;
            state
                .send_private_message_usecase
                .execute(connection_id, recipient, content)
                .await?;
        }
    }
    Ok(())
}

/// Chat bodies only carry CHAT; JOIN and LEAVE are produced by the server
fn chat_payload(body: serde_json::Value) -> Result<(Username, MessageContent), RouteError> {
    let payload: ChatMessagePayload = parse_body(body)?;
    match payload.r#type {
        None | Some(MessageType::Chat) => {}
        Some(other) => return Err(RouteError::UnsupportedMessageType(other)),
    }
    Ok((
        Username::new(payload.sender)?,
        MessageContent::new(payload.content)?,
    ))
}

fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, RouteError> {
    serde_json::from_value(body).map_err(|e| RouteError::InvalidPayload(e.to_string()))
}

fn parse_topic(destination: &str) -> Result<Topic, RouteError> {
    Topic::parse(destination)
        .ok_or_else(|| RouteError::UnknownDestination(destination.to_string()))
}

fn is_user_queue(destination: &str) -> bool {
    [UserQueue::Messages, UserQueue::Errors]
        .iter()
        .any(|queue| queue.user_destination() == destination)
}

async fn report_error(state: &AppState, connection_id: &ConnectionId, error: &RouteError) {
    tracing::warn!("Rejected frame from '{}': {}", connection_id, error);
    let notice = ErrorNotice::new(format!("An error occurred: {}", error));
    if let Err(e) = state
        .message_pusher
        .push_to(connection_id, UserQueue::Errors, &OutboundMessage::Error(notice))
        .await
    {
        tracing::warn!(
            "Failed to deliver error notice to '{}': {}",
            connection_id,
            e
        );
    }
}
