//! InMemory Presence Registry 実装
//!
//! オンラインユーザーの集合とコネクション ID の対応を 1 つの DashMap で保持するため、
//! 集合への所属とコネクション ID のエントリは常に同時に追加・削除されます。

use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ConnectionId, PresenceRegistry, Username};

/// インメモリ Presence Registry 実装
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    /// Key: ユーザー名
    /// Value: 個人宛メッセージの配送先コネクション（不明なら None）
    users: DashMap<Username, Option<ConnectionId>>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn add_user(&self, username: Username) {
        self.users.entry(username).or_insert(None);
    }

    async fn add_user_with_connection(&self, username: Username, connection_id: ConnectionId) {
        tracing::debug!(
            "User '{}' bound to connection '{}'",
            username,
            connection_id
        );
        self.users.insert(username, Some(connection_id));
    }

    async fn remove_user(&self, username: &Username) {
        self.users.remove(username);
    }

    async fn remove_user_if_connection(
        &self,
        username: &Username,
        connection_id: &ConnectionId,
    ) -> bool {
        self.users
            .remove_if(username, |_, bound| bound.as_ref() == Some(connection_id))
            .is_some()
    }

    async fn is_online(&self, username: &Username) -> bool {
        self.users.contains_key(username)
    }

    async fn count(&self) -> usize {
        self.users.len()
    }

    async fn list_users(&self) -> BTreeSet<Username> {
        self.users.iter().map(|entry| entry.key().clone()).collect()
    }

    async fn principal_of(&self, username: &Username) -> Option<ConnectionId> {
        self.users
            .get(username)
            .and_then(|entry| entry.value().clone())
    }
}
