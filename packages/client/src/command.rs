//! Input line parsing and outbound frame construction.

use agora_server::{
    domain::{RoomId, Topic, Username},
    infrastructure::dto::websocket::{
        ChatMessagePayload, ClientFrame, JoinPayload, MessageType, PrivateMessagePayload,
    },
};
use serde::Serialize;
use thiserror::Error;

use crate::error::ClientError;

const SEND_MESSAGE_DESTINATION: &str = "/app/chat.sendMessage";
const ADD_USER_DESTINATION: &str = "/app/chat.addUser";
const PRIVATE_DESTINATION: &str = "/app/chat.private";

/// One line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain text: chat to the current room, or to the public chat
    Chat(String),
    /// `/dm <user> <text>`
    Private { recipient: String, content: String },
    /// `/quit`
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: /dm <user> <message>")]
    DmUsage,

    #[error("unknown command '{0}' (available: /dm, /quit)")]
    Unknown(String),
}

impl InputCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if !line.starts_with('/') {
            return Ok(InputCommand::Chat(line.to_string()));
        }

        let (name, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        match name {
            "/quit" => Ok(InputCommand::Quit),
            "/dm" => {
                let (recipient, content) = rest
                    .trim_start()
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::DmUsage)?;
                let content = content.trim_start();
                if content.is_empty() {
                    return Err(CommandError::DmUsage);
                }
                Ok(InputCommand::Private {
                    recipient: recipient.to_string(),
                    content: content.to_string(),
                })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Who the client joins as, and where its chat lines go
#[derive(Debug, Clone)]
pub struct ChatTarget {
    username: Username,
    room_id: Option<RoomId>,
}

impl ChatTarget {
    pub fn new(username: String, room: Option<String>) -> Result<Self, ClientError> {
        let username =
            Username::new(username).map_err(|e| ClientError::InvalidUsername(e.to_string()))?;
        let room_id = room
            .map(RoomId::new)
            .transpose()
            .map_err(|e| ClientError::InvalidRoomId(e.to_string()))?;
        Ok(Self { username, room_id })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Topics to subscribe to right after connecting
    pub fn subscriptions(&self) -> Vec<String> {
        let mut topics = vec![Topic::Public.destination(), Topic::Users.destination()];
        if let Some(room_id) = &self.room_id {
            topics.push(Topic::Room(room_id.clone()).destination());
        }
        topics
    }

    pub fn join_frame(&self) -> Result<ClientFrame, ClientError> {
        send_frame(
            self.room_destination(ADD_USER_DESTINATION),
            &JoinPayload {
                sender: self.username.as_str().to_string(),
            },
        )
    }

    /// Frame for a command; `None` for `/quit`
    pub fn frame_for(&self, command: &InputCommand) -> Result<Option<ClientFrame>, ClientError> {
        let frame = match command {
            InputCommand::Chat(content) => send_frame(
                self.room_destination(SEND_MESSAGE_DESTINATION),
                &ChatMessagePayload {
                    r#type: Some(MessageType::Chat),
                    sender: self.username.as_str().to_string(),
                    content: content.clone(),
                },
            )?,
            InputCommand::Private { recipient, content } => send_frame(
                PRIVATE_DESTINATION.to_string(),
                &PrivateMessagePayload {
                    recipient: recipient.clone(),
                    content: content.clone(),
                },
            )?,
            InputCommand::Quit => return Ok(None),
        };
        Ok(Some(frame))
    }

    fn room_destination(&self, base: &str) -> String {
        match &self.room_id {
            Some(room_id) => format!("{}/{}", base, room_id),
            None => base.to_string(),
        }
    }
}

fn send_frame(destination: String, payload: &impl Serialize) -> Result<ClientFrame, ClientError> {
    let body =
        serde_json::to_value(payload).map_err(|e| ClientError::ProtocolError(e.to_string()))?;
    Ok(ClientFrame::Send { destination, body })
}
