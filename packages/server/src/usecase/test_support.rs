//! ユースケースのテスト用フィクスチャ

use std::sync::Arc;

use agora_shared::time::{Clock, FixedClock};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePusher, RoomName, Topic, Username},
    infrastructure::{
        dto::websocket::ServerFrame,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryPresenceRegistry, InMemoryRoomRepository, InMemorySessionStore},
    },
};

pub(crate) const NOW: i64 = 1_700_000_000_000;

/// インメモリ実装と実際の WebSocketMessagePusher をまとめたフィクスチャ
pub(crate) struct Fixture {
    pub presence: Arc<InMemoryPresenceRegistry>,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<dyn Clock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            presence: Arc::new(InMemoryPresenceRegistry::new()),
            rooms: Arc::new(InMemoryRoomRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    /// コネクションを登録し、指定トピックを購読させる
    pub async fn connect(&self, id: &str, topics: &[Topic]) -> Inbox {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = connection(id);
        self.pusher
            .register_connection(connection_id.clone(), tx)
            .await;
        for topic in topics {
            self.pusher.subscribe(&connection_id, topic.clone()).await;
        }
        Inbox { rx }
    }
}

/// コネクションが受け取ったフレーム
pub(crate) struct Inbox {
    rx: mpsc::UnboundedReceiver<String>,
}

impl Inbox {
    /// 受信済みのフレームを全て (宛先, body) として取り出す
    pub fn drain(&mut self) -> Vec<(String, serde_json::Value)> {
        let mut frames = Vec::new();
        while let Ok(raw) = self.rx.try_recv() {
            match serde_json::from_str::<ServerFrame>(&raw) {
                Ok(ServerFrame::Message { destination, body }) => frames.push((destination, body)),
                Ok(other) => panic!("unexpected frame: {:?}", other),
                Err(e) => panic!("invalid frame {}: {}", raw, e),
            }
        }
        frames
    }

    /// 指定宛先のフレームの body だけを取り出す
    pub fn drain_for(&mut self, destination: &str) -> Vec<serde_json::Value> {
        self.drain()
            .into_iter()
            .filter(|(d, _)| d == destination)
            .map(|(_, body)| body)
            .collect()
    }
}

pub(crate) fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub(crate) fn username(name: &str) -> Username {
    Username::new(name.to_string()).unwrap()
}

pub(crate) fn room_name(name: &str) -> RoomName {
    RoomName::new(name.to_string()).unwrap()
}
