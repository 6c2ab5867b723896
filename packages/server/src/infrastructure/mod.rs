//! Infrastructure layer: concrete implementations of the domain interfaces
//! (in-memory registries, WebSocket message pusher) and the wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
