//! エンティティ
//!
//! メッセージは生成後に変更されない。タイムスタンプは常にサーバー側で付与され、
//! クライアントから受け取った値は使わない。

use std::collections::BTreeSet;

use super::value_object::{MessageContent, RoomId, RoomIdFactory, RoomName, Timestamp, Username};

/// チャットメッセージの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// 通常のチャット
    Chat,
    /// 入室通知（サーバーが生成）
    Join,
    /// 退室通知（サーバーが生成）
    Leave,
}

/// トピックにブロードキャストされるチャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    kind: MessageKind,
    content: String,
    sender: Username,
    timestamp: Timestamp,
}

impl ChatMessage {
    /// 通常のチャットメッセージを生成（本文はクライアントの送信内容そのまま）
    pub fn chat(sender: Username, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            kind: MessageKind::Chat,
            content: content.into_string(),
            sender,
            timestamp,
        }
    }

    /// 入室通知を生成
    pub fn join(sender: Username, timestamp: Timestamp) -> Self {
        Self {
            kind: MessageKind::Join,
            content: format!("{} joined", sender),
            sender,
            timestamp,
        }
    }

    /// 退室通知を生成
    pub fn leave(sender: Username, timestamp: Timestamp) -> Self {
        Self {
            kind: MessageKind::Leave,
            content: format!("{} left", sender),
            sender,
            timestamp,
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> &Username {
        &self.sender
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// 個人宛メッセージ
///
/// 送信者はセッションに記録されたユーザー名で上書きされる（なりすまし防止）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessage {
    sender: Username,
    recipient: Username,
    content: MessageContent,
    timestamp: Timestamp,
}

impl PrivateMessage {
    pub fn new(
        sender: Username,
        recipient: Username,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            sender,
            recipient,
            content,
            timestamp,
        }
    }

    pub fn sender(&self) -> &Username {
        &self.sender
    }

    pub fn recipient(&self) -> &Username {
        &self.recipient
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// チャットルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: RoomId,
    pub name: RoomName,
    occupant_count: u32,
}

impl ChatRoom {
    /// 新しい ID を払い出し、在室人数 0 でルームを生成
    pub fn create(name: RoomName) -> Self {
        Self {
            id: RoomIdFactory::generate(),
            name,
            occupant_count: 0,
        }
    }

    pub fn occupant_count(&self) -> u32 {
        self.occupant_count
    }

    /// 入室（在室人数 +1）
    pub fn enter(&mut self) -> u32 {
        self.occupant_count = self.occupant_count.saturating_add(1);
        self.occupant_count
    }

    /// 退室（在室人数 -1、0 未満にはならない）
    pub fn leave(&mut self) -> u32 {
        self.occupant_count = self.occupant_count.saturating_sub(1);
        self.occupant_count
    }
}

/// コネクションごとのセッション情報
///
/// join 時に記録され、切断時に後始末の対象を知るために参照される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub username: Option<Username>,
    pub room_id: Option<RoomId>,
}

impl SessionContext {
    pub fn has_joined(&self) -> bool {
        self.username.is_some()
    }
}

/// オンラインユーザーのスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineUsers {
    pub users: BTreeSet<Username>,
}

impl OnlineUsers {
    pub fn new(users: BTreeSet<Username>) -> Self {
        Self { users }
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }
}

/// 発信元コネクションにだけ返すエラー通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub message: String,
}

impl ErrorNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// MessagePusher に渡す送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Chat(ChatMessage),
    Private(PrivateMessage),
    OnlineUsers(OnlineUsers),
    Error(ErrorNotice),
}
