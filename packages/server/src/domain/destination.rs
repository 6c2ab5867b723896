//! 配送先（トピックと個人宛キュー）

use super::value_object::RoomId;

const PUBLIC_TOPIC: &str = "/topic/public";
const USERS_TOPIC: &str = "/topic/users";
const ROOM_TOPIC_PREFIX: &str = "/topic/room.";

/// ブロードキャスト先のトピック
///
/// 購読している全てのコネクションに配送される。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// `/topic/public`
    Public,
    /// `/topic/room.{roomId}`
    Room(RoomId),
    /// `/topic/users`（オンラインユーザー数・一覧）
    Users,
}

impl Topic {
    /// 購読・配送に使う宛先文字列
    pub fn destination(&self) -> String {
        match self {
            Topic::Public => PUBLIC_TOPIC.to_string(),
            Topic::Users => USERS_TOPIC.to_string(),
            Topic::Room(room_id) => format!("{}{}", ROOM_TOPIC_PREFIX, room_id.as_str()),
        }
    }

    /// 宛先文字列からトピックを解決する。未知の宛先は `None`。
    pub fn parse(destination: &str) -> Option<Self> {
        match destination {
            PUBLIC_TOPIC => Some(Topic::Public),
            USERS_TOPIC => Some(Topic::Users),
            _ => destination
                .strip_prefix(ROOM_TOPIC_PREFIX)
                .and_then(|id| RoomId::new(id.to_string()).ok())
                .map(Topic::Room),
        }
    }
}

/// 個人宛キュー
///
/// 購読の有無に関わらず、宛先コネクションにだけ配送される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserQueue {
    /// 個人宛チャット
    Messages,
    /// エラー通知
    Errors,
}

impl UserQueue {
    pub fn path(&self) -> &'static str {
        match self {
            UserQueue::Messages => "/queue/messages",
            UserQueue::Errors => "/queue/errors",
        }
    }

    /// クライアントから見た宛先（`/user/queue/...`）
    pub fn user_destination(&self) -> String {
        format!("/user{}", self.path())
    }
}
