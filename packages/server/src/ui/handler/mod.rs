//! WebSocket and HTTP handlers.

mod http;
mod message;
mod websocket;

pub use http::{create_room, get_online_users, get_room_detail, get_rooms, health_check};
pub use websocket::websocket_handler;
