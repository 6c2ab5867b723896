//! Agora chat server library.
//!
//! Routes chat messages to public, per-room and per-user destinations over
//! WebSocket, and tracks room occupancy and online presence in memory.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
