//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{ChatRoom, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 全ルームのスナップショット（名前、ID の順）
    pub async fn execute(&self) -> Vec<ChatRoom> {
        self.rooms.list_all().await
    }
}
