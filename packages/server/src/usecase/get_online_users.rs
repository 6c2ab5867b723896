//! UseCase: オンラインユーザー取得と `/topic/users` へのスナップショット配信

use std::sync::Arc;

use crate::domain::{
    MessagePushError, MessagePusher, OnlineUsers, OutboundMessage, PresenceRegistry, Topic,
};

/// オンラインユーザー取得のユースケース
pub struct GetOnlineUsersUseCase {
    presence: Arc<dyn PresenceRegistry>,
}

impl GetOnlineUsersUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { presence }
    }

    pub async fn execute(&self) -> OnlineUsers {
        OnlineUsers::new(self.presence.list_users().await)
    }
}

/// 現在のオンラインユーザーのスナップショットを `/topic/users` に配信
pub(crate) async fn broadcast_online_users(
    presence: &dyn PresenceRegistry,
    message_pusher: &dyn MessagePusher,
) -> Result<usize, MessagePushError> {
    let snapshot = OnlineUsers::new(presence.list_users().await);
    tracing::debug!("Broadcasting online users (count: {})", snapshot.count());
    message_pusher
        .publish(&Topic::Users, &OutboundMessage::OnlineUsers(snapshot))
        .await
}
