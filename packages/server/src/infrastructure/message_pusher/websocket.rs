//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとの `UnboundedSender` を管理
//! - トピックの購読管理
//! - トピックへのブロードキャストと個人宛キューへの配送
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、フレームの送信に使用します。
//! 送信内容（ドメインモデル）から DTO・JSON への変換もここで行います。

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{
    domain::{
        ConnectionId, MessagePushError, MessagePusher, OutboundMessage, PusherChannel, Topic,
        UserQueue,
    },
    infrastructure::dto::{conversion::outbound_body, websocket::ServerFrame},
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: コネクション ID
    /// Value: そのコネクションへのフレーム送信チャンネル
    connections: DashMap<ConnectionId, PusherChannel>,
    /// Key: トピック
    /// Value: 購読しているコネクション
    subscriptions: DashMap<Topic, HashSet<ConnectionId>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// トピックの購読者数
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.subscriptions
            .get(topic)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }

    fn encode_frame(
        destination: String,
        message: &OutboundMessage,
    ) -> Result<String, MessagePushError> {
        let body =
            outbound_body(message).map_err(|e| MessagePushError::Serialization(e.to_string()))?;
        serde_json::to_string(&ServerFrame::Message { destination, body })
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        self.connections.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
        self.subscriptions.retain(|_, subscribers| {
            subscribers.remove(connection_id);
            !subscribers.is_empty()
        });
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn subscribe(&self, connection_id: &ConnectionId, topic: Topic) {
        tracing::debug!(
            "Connection '{}' subscribed to '{}'",
            connection_id,
            topic.destination()
        );
        self.subscriptions
            .entry(topic)
            .or_default()
            .insert(connection_id.clone());
    }

    async fn unsubscribe(&self, connection_id: &ConnectionId, topic: &Topic) {
        if let Some(mut subscribers) = self.subscriptions.get_mut(topic) {
            subscribers.remove(connection_id);
        }
        self.subscriptions
            .remove_if(topic, |_, subscribers| subscribers.is_empty());
    }

    async fn publish(
        &self,
        topic: &Topic,
        message: &OutboundMessage,
    ) -> Result<usize, MessagePushError> {
        let frame = Self::encode_frame(topic.destination(), message)?;

        // 購読者をコピーしてからロックを解放する
        let subscribers: Vec<ConnectionId> = match self.subscriptions.get(topic) {
            Some(entry) => entry.iter().cloned().collect(),
            None => Vec::new(),
        };

        let mut delivered = 0;
        for subscriber in subscribers {
            match self.connections.get(&subscriber) {
                Some(sender) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!(
                            "Failed to push message to connection '{}': {}",
                            subscriber,
                            e
                        );
                    } else {
                        delivered += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        subscriber
                    );
                }
            }
        }

        tracing::debug!(
            "Published to '{}' ({} subscribers reached)",
            topic.destination(),
            delivered
        );
        Ok(delivered)
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        queue: UserQueue,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode_frame(queue.user_destination(), message)?;

        let sender = self
            .connections
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Pushed message to connection '{}' on '{}'",
            connection_id,
            queue.path()
        );
        Ok(())
    }
}
