//! Repository trait 定義
//!
//! ユースケース層が必要とする共有状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各操作はそれ自体でアトミックであり、複数のレジストリをまたぐトランザクションは
//! 提供しません。レジストリ間の一時的な不整合は許容します。

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::{
    entity::{ChatRoom, SessionContext},
    value_object::{ConnectionId, RoomId, RoomName, Username},
};

/// オンラインユーザーのレジストリ
///
/// オンラインのユーザー名の集合と、個人宛メッセージの配送に使う
/// ユーザー名 → コネクション ID の対応を保持する。
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// ユーザーを追加（既に存在する場合は何もしない）
    async fn add_user(&self, username: Username);

    /// コネクション ID 付きでユーザーを追加（既存のコネクション ID は上書き）
    async fn add_user_with_connection(&self, username: Username, connection_id: ConnectionId);

    /// ユーザーを削除（存在しない場合は何もしない）
    async fn remove_user(&self, username: &Username);

    /// ユーザーが指定のコネクションに対応している場合だけ削除
    ///
    /// 同じユーザー名で後から join した別のコネクションがあれば何もしない。
    /// 削除した場合は `true`。
    async fn remove_user_if_connection(
        &self,
        username: &Username,
        connection_id: &ConnectionId,
    ) -> bool;

    async fn is_online(&self, username: &Username) -> bool;

    async fn count(&self) -> usize;

    /// 呼び出し時点のユーザー集合のコピー
    async fn list_users(&self) -> BTreeSet<Username>;

    /// ユーザーのコネクション ID
    async fn principal_of(&self, username: &Username) -> Option<ConnectionId>;
}

/// チャットルームのレジストリ
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい ID を払い出してルームを作成
    async fn create_room(&self, name: RoomName) -> ChatRoom;

    async fn find_by_id(&self, room_id: &RoomId) -> Option<ChatRoom>;

    /// 全ルームのスナップショット（名前、ID の順でソート）
    async fn list_all(&self) -> Vec<ChatRoom>;

    /// 在室人数を +1。ルームが存在しない場合は何もせず `None`。
    async fn enter(&self, room_id: &RoomId) -> Option<u32>;

    /// 在室人数を -1（0 未満にはならない）。ルームが存在しない場合は何もせず `None`。
    async fn leave(&self, room_id: &RoomId) -> Option<u32>;
}

/// コネクションごとのセッション情報のストア
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set_username(&self, connection_id: &ConnectionId, username: Username);

    async fn set_room(&self, connection_id: &ConnectionId, room_id: RoomId);

    /// セッション情報を取得（未記録なら空のコンテキスト）
    async fn get(&self, connection_id: &ConnectionId) -> SessionContext;

    /// セッション情報を破棄（冪等）
    async fn clear(&self, connection_id: &ConnectionId);
}
