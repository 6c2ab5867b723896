//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{ChatRoom, RoomId, RoomRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<ChatRoom, GetRoomDetailError> {
        self.rooms
            .find_by_id(room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
