//! InMemory Session Store 実装

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ConnectionId, RoomId, SessionContext, SessionStore, Username};

/// コネクション ID をキーにしたセッション情報のストア
///
/// 同じコネクションのイベントは順序付きで届くため、エントリは他のコネクションと共有されない。
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<ConnectionId, SessionContext>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持しているセッション数
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set_username(&self, connection_id: &ConnectionId, username: Username) {
        self.sessions
            .entry(connection_id.clone())
            .or_default()
            .username = Some(username);
    }

    async fn set_room(&self, connection_id: &ConnectionId, room_id: RoomId) {
        self.sessions
            .entry(connection_id.clone())
            .or_default()
            .room_id = Some(room_id);
    }

    async fn get(&self, connection_id: &ConnectionId) -> SessionContext {
        self.sessions
            .get(connection_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn clear(&self, connection_id: &ConnectionId) {
        self.sessions.remove(connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_unknown_connection_returns_empty_context() {
        // テスト項目: 未記録のコネクションは空のセッション情報を返す
        // given (前提条件):
        let store = InMemorySessionStore::new();

        // when (操作):
        let context = store.get(&connection("c1")).await;

        // then (期待する結果):
        assert_eq!(context, SessionContext::default());
    }

    #[tokio::test]
    async fn test_set_username_and_room() {
        // テスト項目: ユーザー名とルーム ID が記録される
        // given (前提条件):
        let store = InMemorySessionStore::new();
        let alice = Username::new("alice".to_string()).unwrap();
        let room_id = RoomId::new("r1".to_string()).unwrap();

        // when (操作):
        store.set_username(&connection("c1"), alice.clone()).await;
        store.set_room(&connection("c1"), room_id.clone()).await;

        // then (期待する結果):
        let context = store.get(&connection("c1")).await;
        assert_eq!(context.username, Some(alice));
        assert_eq!(context.room_id, Some(room_id));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_connection() {
        // テスト項目: セッション情報はコネクション間で共有されない
        // given (前提条件):
        let store = InMemorySessionStore::new();
        let alice = Username::new("alice".to_string()).unwrap();

        // when (操作):
        store.set_username(&connection("c1"), alice).await;

        // then (期待する結果):
        assert!(store.get(&connection("c2")).await.username.is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        // テスト項目: clear は冪等でエントリを削除する
        // given (前提条件):
        let store = InMemorySessionStore::new();
        let alice = Username::new("alice".to_string()).unwrap();
        store.set_username(&connection("c1"), alice).await;

        // when (操作):
        store.clear(&connection("c1")).await;
        store.clear(&connection("c1")).await;

        // then (期待する結果):
        assert!(store.is_empty());
        assert!(!store.get(&connection("c1")).await.has_joined());
    }
}
