//! Errors raised while handling an inbound WebSocket frame.
//!
//! Every variant is reported to the originating connection only, on
//! `/user/queue/errors`.

use thiserror::Error;

use crate::{
    domain::ValueObjectError,
    infrastructure::dto::websocket::MessageType,
    usecase::{JoinError, SendMessageError, SendPrivateMessageError},
};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("unknown destination '{0}'")]
    UnknownDestination(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("message type {0:?} cannot be sent by clients")]
    UnsupportedMessageType(MessageType),

    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    SendMessage(#[from] SendMessageError),

    #[error(transparent)]
    SendPrivateMessage(#[from] SendPrivateMessageError),

    /// A handler panicked; details stay in the server log
    #[error("internal server error")]
    Internal,
}
