//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 在室人数の減算、オンラインユーザーからの削除、退室通知の配送先
//!
//! ### なぜこのテストが必要か
//! - 公開チャットのみのユーザーの切断でルームが変化しないことを保証
//! - join していないコネクションの切断で何も配送されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム入室中のユーザー、公開チャットのみのユーザーの切断
//! - エッジケース：join 前の切断、同じコネクションの二重切断
//! - エッジケース：同じユーザー名で再接続した後に古いコネクションが切断

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, OutboundMessage, PresenceRegistry, RoomRepository,
    SessionStore, Timestamp, Topic,
};

use super::get_online_users::broadcast_online_users;

/// 切断のユースケース
pub struct DisconnectSessionUseCase {
    presence: Arc<dyn PresenceRegistry>,
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionStore>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence,
            rooms,
            sessions,
            message_pusher,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// セッションに記録されたユーザー名とルームをもとに後始末を行う。
    /// 切断の通知自体は失敗しないため、配送の失敗はログに残すだけにする。
    ///
    /// # Returns
    ///
    /// * `Some(ChatMessage)` - ブロードキャストした退室通知
    /// * `None` - join していないコネクションだった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<ChatMessage> {
        // 1. セッション情報を取得してから配送先の登録を解除
        let context = self.sessions.get(connection_id).await;
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        let Some(username) = context.username else {
            tracing::debug!("Connection '{}' closed before joining", connection_id);
            self.sessions.clear(connection_id).await;
            return None;
        };

        // 2. ルームから退室（公開チャットのみのユーザーはルームに触れない）
        let topic = match context.room_id {
            Some(room_id) => {
                match self.rooms.leave(&room_id).await {
                    Some(remaining) => tracing::info!(
                        "User left - room: {}, name: {}, remaining: {}",
                        room_id,
                        username,
                        remaining
                    ),
                    None => tracing::warn!(
                        "User '{}' left unknown room '{}'",
                        username,
                        room_id
                    ),
                }
                Topic::Room(room_id)
            }
            None => {
                tracing::info!("User left - name: {}", username);
                Topic::Public
            }
        };

        // 3. オンラインユーザーから削除し、セッション情報を破棄
        //    同じユーザー名で別のコネクションが join 済みならオンラインのまま残す
        if !self
            .presence
            .remove_user_if_connection(&username, connection_id)
            .await
        {
            tracing::debug!(
                "User '{}' is still online via another connection",
                username
            );
        }
        self.sessions.clear(connection_id).await;

        // 4. 退室通知と最新のオンラインユーザー一覧をブロードキャスト
        let message = ChatMessage::leave(username, Timestamp::new(self.clock.now_millis()));
        if let Err(e) = self
            .message_pusher
            .publish(&topic, &OutboundMessage::Chat(message.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast leave message: {}", e);
        }
        if let Err(e) =
            broadcast_online_users(self.presence.as_ref(), self.message_pusher.as_ref()).await
        {
            tracing::warn!("Failed to broadcast online users: {}", e);
        }

        Some(message)
    }
}
