//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() / execute_in_room() メソッド
//! - タイムスタンプの付与と配送先トピックの決定
//!
//! ### なぜこのテストが必要か
//! - 本文がクライアントの送信内容のまま配送されることを保証
//! - タイムスタンプは常にサーバー側の時刻であることを保証
//! - ルーム宛のメッセージが他のトピックに漏れないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：公開チャット、ルームへの送信
//! - エッジケース：存在しないルームへの送信（何もしない）

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessageContent, MessagePusher, OutboundMessage, RoomId, RoomRepository,
    Timestamp, Topic, Username,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（ルームの存在確認に使用）
    rooms: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            message_pusher,
            clock,
        }
    }

    /// 公開チャット（`/topic/public`）にメッセージを送信
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - タイムスタンプを付与してブロードキャストしたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        sender: Username,
        content: MessageContent,
    ) -> Result<ChatMessage, SendMessageError> {
        tracing::info!(
            "Message received - sender: {}, content: {}",
            sender,
            content.as_str()
        );
        let message = ChatMessage::chat(sender, content, self.now());
        self.broadcast(&Topic::Public, &message).await?;
        Ok(message)
    }

    /// ルーム（`/topic/room.{roomId}`）にメッセージを送信
    ///
    /// ルームは暗黙に作成しない。存在しないルームへの送信は何もせず `Ok(None)` を返す。
    pub async fn execute_in_room(
        &self,
        room_id: RoomId,
        sender: Username,
        content: MessageContent,
    ) -> Result<Option<ChatMessage>, SendMessageError> {
        if self.rooms.find_by_id(&room_id).await.is_none() {
            tracing::warn!(
                "Message from '{}' to unknown room '{}' dropped",
                sender,
                room_id
            );
            return Ok(None);
        }

        tracing::info!(
            "Message received - room: {}, sender: {}, content: {}",
            room_id,
            sender,
            content.as_str()
        );
        let message = ChatMessage::chat(sender, content, self.now());
        self.broadcast(&Topic::Room(room_id), &message).await?;
        Ok(Some(message))
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    async fn broadcast(
        &self,
        topic: &Topic,
        message: &ChatMessage,
    ) -> Result<(), SendMessageError> {
        self.message_pusher
            .publish(topic, &OutboundMessage::Chat(message.clone()))
            .await
            .map(|_| ())
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))
    }
}
