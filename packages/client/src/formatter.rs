//! Message formatting utilities for client display.

use agora_server::infrastructure::dto::websocket::{
    ChatMessage, ErrorMessage, MessageType, OnlineUsersMessage, PrivateMessage,
};
use agora_shared::time::timestamp_to_local_hhmm;

const USERS_DESTINATION: &str = "/topic/users";
const PRIVATE_DESTINATION: &str = "/user/queue/messages";
const ERRORS_DESTINATION: &str = "/user/queue/errors";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a delivery according to its destination
    ///
    /// Bodies that do not match the expected shape are shown raw.
    pub fn format_delivery(destination: &str, body: &serde_json::Value) -> String {
        let formatted = match destination {
            USERS_DESTINATION => serde_json::from_value::<OnlineUsersMessage>(body.clone())
                .ok()
                .map(|msg| Self::format_online_users(&msg)),
            PRIVATE_DESTINATION => serde_json::from_value::<PrivateMessage>(body.clone())
                .ok()
                .map(|msg| Self::format_private_message(&msg)),
            ERRORS_DESTINATION => serde_json::from_value::<ErrorMessage>(body.clone())
                .ok()
                .map(|msg| Self::format_error(&msg)),
            _ => serde_json::from_value::<ChatMessage>(body.clone())
                .ok()
                .map(|msg| Self::format_chat_message(&msg)),
        };
        formatted.unwrap_or_else(|| Self::format_raw_message(&body.to_string()))
    }

    /// Format a CHAT / JOIN / LEAVE message
    pub fn format_chat_message(message: &ChatMessage) -> String {
        let time = timestamp_to_local_hhmm(message.timestamp);
        match message.r#type {
            MessageType::Chat => format!("\n[{}] {}: {}\n", time, message.sender, message.content),
            MessageType::Join => format!("\n[{}] + {}\n", time, message.content),
            MessageType::Leave => format!("\n[{}] - {}\n", time, message.content),
        }
    }

    pub fn format_private_message(message: &PrivateMessage) -> String {
        format!(
            "\n[{}] (dm) {} -> {}: {}\n",
            timestamp_to_local_hhmm(message.timestamp),
            message.sender,
            message.recipient,
            message.content
        )
    }

    pub fn format_online_users(message: &OnlineUsersMessage) -> String {
        format!(
            "\n* {} online: {}\n",
            message.count,
            message.users.join(", ")
        )
    }

    pub fn format_error(message: &ErrorMessage) -> String {
        format!("\n! {}\n", message.message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
