//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket を使った実装（購読管理を含む）

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
