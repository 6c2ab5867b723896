//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    entity::{ChatMessage, ChatRoom, ErrorNotice, MessageKind, OnlineUsers, PrivateMessage},
    OutboundMessage,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<MessageKind> for dto::MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Chat => dto::MessageType::Chat,
            MessageKind::Join => dto::MessageType::Join,
            MessageKind::Leave => dto::MessageType::Leave,
        }
    }
}

impl From<&ChatMessage> for dto::ChatMessage {
    fn from(model: &ChatMessage) -> Self {
        Self {
            r#type: model.kind().into(),
            content: model.content().to_string(),
            sender: model.sender().as_str().to_string(),
            timestamp: model.timestamp().value(),
        }
    }
}

impl From<&PrivateMessage> for dto::PrivateMessage {
    fn from(model: &PrivateMessage) -> Self {
        Self {
            sender: model.sender().as_str().to_string(),
            recipient: model.recipient().as_str().to_string(),
            content: model.content().as_str().to_string(),
            timestamp: model.timestamp().value(),
        }
    }
}

impl From<&OnlineUsers> for dto::OnlineUsersMessage {
    fn from(model: &OnlineUsers) -> Self {
        Self {
            count: model.count(),
            users: model.users.iter().map(|u| u.as_str().to_string()).collect(),
        }
    }
}

impl From<&ErrorNotice> for dto::ErrorMessage {
    fn from(model: &ErrorNotice) -> Self {
        Self {
            message: model.message.clone(),
        }
    }
}

impl From<&ChatRoom> for http::ChatRoomDto {
    fn from(model: &ChatRoom) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            user_count: model.occupant_count(),
        }
    }
}

/// 送信内容をフレームの body（JSON）に変換
pub fn outbound_body(message: &OutboundMessage) -> Result<serde_json::Value, serde_json::Error> {
    match message {
        OutboundMessage::Chat(m) => serde_json::to_value(dto::ChatMessage::from(m)),
        OutboundMessage::Private(m) => serde_json::to_value(dto::PrivateMessage::from(m)),
        OutboundMessage::OnlineUsers(m) => serde_json::to_value(dto::OnlineUsersMessage::from(m)),
        OutboundMessage::Error(m) => serde_json::to_value(dto::ErrorMessage::from(m)),
    }
}
