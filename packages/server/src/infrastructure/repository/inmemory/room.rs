//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! DashMap をインメモリ DB として使用します。
//!
//! 在室人数の更新は DashMap のエントリロックの中で行うため、
//! 並行した enter / leave で更新が失われることはありません。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ChatRoom, RoomId, RoomName, RoomRepository};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: DashMap<RoomId, ChatRoom>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, name: RoomName) -> ChatRoom {
        let room = ChatRoom::create(name);
        self.rooms.insert(room.id.clone(), room.clone());
        tracing::info!(
            "Room created - id: {}, name: {}",
            room.id,
            room.name.as_str()
        );
        room
    }

    async fn find_by_id(&self, room_id: &RoomId) -> Option<ChatRoom> {
        self.rooms.get(room_id).map(|entry| entry.value().clone())
    }

    async fn list_all(&self) -> Vec<ChatRoom> {
        let mut rooms: Vec<ChatRoom> = self
            .rooms
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        rooms
    }

    async fn enter(&self, room_id: &RoomId) -> Option<u32> {
        let mut room = self.rooms.get_mut(room_id)?;
        let count = room.enter();
        tracing::info!(
            "Room entered - room: {}, occupants: {}",
            room.name.as_str(),
            count
        );
        Some(count)
    }

    async fn leave(&self, room_id: &RoomId) -> Option<u32> {
        let mut room = self.rooms.get_mut(room_id)?;
        let count = room.leave();
        tracing::info!(
            "Room left - room: {}, occupants: {}",
            room.name.as_str(),
            count
        );
        Some(count)
    }
}
