//! UseCase: ルーム作成

use std::sync::Arc;

use crate::domain::{ChatRoom, RoomName, RoomRepository};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl CreateRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 新しい ID を払い出してルームを作成（在室人数は 0）
    ///
    /// 名前の重複は許容する。ルームは ID で識別される。
    pub async fn execute(&self, name: String) -> Result<ChatRoom, CreateRoomError> {
        let name = RoomName::new(name)?;
        let room = self.rooms.create_room(name).await;
        tracing::info!("Room created - id: {}, name: {}", room.id, room.name);
        Ok(room)
    }
}
