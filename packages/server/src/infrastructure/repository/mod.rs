//! Repository implementations.

pub mod inmemory;

pub use inmemory::{InMemoryPresenceRegistry, InMemoryRoomRepository, InMemorySessionStore};
