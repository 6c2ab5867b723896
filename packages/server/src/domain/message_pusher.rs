//! MessagePusher trait 定義
//!
//! トピックへのブロードキャストと個人宛キューへの配送を抽象化します。
//! 購読管理と最終的な配送はトランスポート側の責務で、ユースケース層は
//! 「どこに何を送るか」だけを決めます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    destination::{Topic, UserQueue},
    entity::OutboundMessage,
    error::MessagePushError,
    value_object::ConnectionId,
};

/// コネクションへ送信するフレーム（JSON 文字列）のチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// コネクションを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// コネクションの登録と全ての購読を解除
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// トピックを購読（冪等）
    async fn subscribe(&self, connection_id: &ConnectionId, topic: Topic);

    /// トピックの購読を解除
    async fn unsubscribe(&self, connection_id: &ConnectionId, topic: &Topic);

    /// トピックの購読者全員に送信し、配送できた数を返す
    ///
    /// 一部の購読者への送信失敗は許容する（ベストエフォート）。
    async fn publish(
        &self,
        topic: &Topic,
        message: &OutboundMessage,
    ) -> Result<usize, MessagePushError>;

    /// 特定のコネクションの個人宛キューに送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        queue: UserQueue,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;
}
