//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The username is rejected locally before connecting
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// The room id is rejected locally before connecting
    #[error("Invalid room id: {0}")]
    InvalidRoomId(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server did not follow the frame protocol
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}
