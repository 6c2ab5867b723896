//! WebSocket chat server implementation.

mod dispatch;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dispatch::{AppRoute, DestinationTable};
pub use error::RouteError;
pub use server::Server;
pub use state::AppState;
