//! UseCase: コネクション確立
//!
//! 接続時にはレジストリを変更しない。ユーザー名は join イベントで初めて決まる。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// コネクション確立のユースケース
pub struct ConnectSessionUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// コネクションを配送先として登録
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::info!("New WebSocket connection - connection id: {}", connection_id);
        self.message_pusher
            .register_connection(connection_id, sender)
            .await;
    }
}
