//! WebSocket frame and message body DTOs.
//!
//! Frames are JSON text messages tagged by `command`. Message bodies keep the
//! field names clients already use (`type`, `sender`, `content`, `timestamp`).

use serde::{Deserialize, Serialize};

/// Chat message type on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Chat,
    Join,
    Leave,
}

/// Frames sent from a client to the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ClientFrame {
    Subscribe {
        destination: String,
    },
    Unsubscribe {
        destination: String,
    },
    Send {
        destination: String,
        #[serde(default)]
        body: serde_json::Value,
    },
}

/// Frames sent from the server to a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Sent once right after the WebSocket upgrade
    Connected { connection_id: String },
    /// Delivery on a topic or a private queue
    Message {
        destination: String,
        body: serde_json::Value,
    },
}

// ========================================
// Inbound bodies
// ========================================

/// Body of `/app/chat.sendMessage[/{roomId}]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<MessageType>,
    pub sender: String,
    pub content: String,
}

/// Body of `/app/chat.addUser[/{roomId}]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinPayload {
    pub sender: String,
}

/// Body of `/app/chat.private`
///
/// A `sender` field sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateMessagePayload {
    pub recipient: String,
    pub content: String,
}

// ========================================
// Outbound bodies
// ========================================

/// Broadcast chat message (CHAT / JOIN / LEAVE)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub r#type: MessageType,
    pub content: String,
    pub sender: String,
    pub timestamp: i64,
}

/// Private message delivered to `/user/queue/messages`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateMessage {
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub timestamp: i64,
}

/// Online user snapshot published to `/topic/users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OnlineUsersMessage {
    pub count: usize,
    pub users: Vec<String>,
}

/// Error notification delivered to `/user/queue/errors`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}
