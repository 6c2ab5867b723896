//! Domain layer: entities, value objects and the interfaces the use cases
//! depend on. Concrete implementations live in the infrastructure layer.

pub mod destination;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use destination::{Topic, UserQueue};
pub use entity::{
    ChatMessage, ChatRoom, ErrorNotice, MessageKind, OnlineUsers, OutboundMessage,
    PrivateMessage, SessionContext,
};
pub use error::{MessagePushError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{PresenceRegistry, RoomRepository, SessionStore};
pub use value_object::{
    ConnectionId, MessageContent, RoomId, RoomIdFactory, RoomName, Timestamp, Username,
};
