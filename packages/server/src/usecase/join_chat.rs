//! UseCase: 入室（join）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - セッション情報の記録、在室人数の更新、オンラインユーザーへの登録
//! - 入室通知とオンラインユーザー一覧のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：公開チャットへの入室、ルームへの入室
//! - 異常系：同じコネクションでの再 join
//! - エッジケース：存在しないルームへの入室（在室人数は変化しない）
//! - 異常系：入室通知の配送失敗（記録を取り消し、再 join できる）

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, OutboundMessage, PresenceRegistry, RoomId,
    RoomRepository, SessionStore, Timestamp, Topic, Username,
};

use super::{error::JoinError, get_online_users::broadcast_online_users};

/// 入室のユースケース
pub struct JoinChatUseCase {
    presence: Arc<dyn PresenceRegistry>,
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionStore>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
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

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 入室するコネクション
    /// * `username` - 入室するユーザー名
    /// * `room_id` - 入室するルーム（`None` なら公開チャット）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ブロードキャストした入室通知
    /// * `Err(JoinError)` - 入室失敗（再 join、入室通知の配送失敗）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        username: Username,
        room_id: Option<RoomId>,
    ) -> Result<ChatMessage, JoinError> {
        // 1. 再 join は受け付けない（在室人数の二重加算を防ぐ）
        let context = self.sessions.get(connection_id).await;
        if let Some(existing) = context.username {
            tracing::warn!(
                "Connection '{}' tried to join as '{}' but has already joined as '{}'",
                connection_id,
                username,
                existing
            );
            return Err(JoinError::AlreadyJoined(existing.into_string()));
        }

        // 2. 状態を変更する前に入室通知を組み立てる
        let message = ChatMessage::join(
            username.clone(),
            Timestamp::new(self.clock.now_millis()),
        );

        // 3. セッション情報を記録し、ルームに入室
        self.sessions
            .set_username(connection_id, username.clone())
            .await;
        let (topic, entered_room) = match room_id {
            Some(room_id) => {
                self.sessions.set_room(connection_id, room_id.clone()).await;
                let entered = self.rooms.enter(&room_id).await.is_some();
                if !entered {
                    tracing::warn!(
                        "User '{}' joined unknown room '{}', occupancy unchanged",
                        username,
                        room_id
                    );
                }
                tracing::info!("User joined - room: {}, name: {}", room_id, username);
                (Topic::Room(room_id), entered)
            }
            None => {
                tracing::info!("User joined - name: {}", username);
                (Topic::Public, false)
            }
        };

        // 4. 入室通知をブロードキャスト（失敗したら記録を取り消し、再 join できるようにする）
        if let Err(e) = self
            .message_pusher
            .publish(&topic, &OutboundMessage::Chat(message.clone()))
            .await
        {
            self.sessions.clear(connection_id).await;
            if let (true, Topic::Room(room_id)) = (entered_room, &topic) {
                self.rooms.leave(room_id).await;
            }
            return Err(JoinError::BroadcastFailed(e.to_string()));
        }

        // 5. オンラインユーザーに登録（個人宛メッセージの配送先）し、一覧をブロードキャスト
        self.presence
            .add_user_with_connection(username, connection_id.clone())
            .await;
        if let Err(e) =
            broadcast_online_users(self.presence.as_ref(), self.message_pusher.as_ref()).await
        {
            tracing::warn!("Failed to broadcast online users: {}", e);
        }

        Ok(message)
    }
}
