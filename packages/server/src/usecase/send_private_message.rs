//! UseCase: 個人宛メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendPrivateMessageUseCase::execute() メソッド
//! - 送信者名のサーバー側での上書き、宛先コネクションの解決
//!
//! ### なぜこのテストが必要か
//! - ペイロードの送信者名を信用しない（なりすまし防止）ことを保証
//! - 宛先がオフラインの場合に何も配送されず、エラーも返らないこと（退行しやすい）
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンラインのユーザーへの送信
//! - エッジケース：オフラインのユーザーへの送信（黙って破棄）
//! - 異常系：join 前の送信

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessageContent, MessagePusher, OutboundMessage, PresenceRegistry,
    PrivateMessage, SessionStore, Timestamp, UserQueue, Username,
};

use super::error::SendPrivateMessageError;

/// 個人宛メッセージ送信のユースケース
pub struct SendPrivateMessageUseCase {
    presence: Arc<dyn PresenceRegistry>,
    sessions: Arc<dyn SessionStore>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendPrivateMessageUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        sessions: Arc<dyn SessionStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence,
            sessions,
            message_pusher,
            clock,
        }
    }

    /// 個人宛メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元のコネクション（送信者名の解決に使う）
    /// * `recipient` - 宛先のユーザー名
    /// * `content` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PrivateMessage))` - 宛先のキューに配送したメッセージ
    /// * `Ok(None)` - 宛先がオフラインのため破棄した（送信者には通知しない）
    /// * `Err(SendPrivateMessageError)` - 送信元がまだ join していない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        recipient: Username,
        content: MessageContent,
    ) -> Result<Option<PrivateMessage>, SendPrivateMessageError> {
        // 1. 送信者はセッションに記録されたユーザー名で決める
        let sender = self
            .sessions
            .get(connection_id)
            .await
            .username
            .ok_or(SendPrivateMessageError::NotJoined)?;

        // 2. 宛先のコネクションを解決（オフラインなら破棄）
        let Some(target) = self.presence.principal_of(&recipient).await else {
            tracing::debug!(
                "Private message from '{}' to offline user '{}' dropped",
                sender,
                recipient
            );
            return Ok(None);
        };

        // 3. 宛先の個人宛キューに配送
        let message = PrivateMessage::new(
            sender,
            recipient,
            content,
            Timestamp::new(self.clock.now_millis()),
        );
        if let Err(e) = self
            .message_pusher
            .push_to(
                &target,
                UserQueue::Messages,
                &OutboundMessage::Private(message.clone()),
            )
            .await
        {
            // 宛先が切断処理中などで配送できない場合も送信者には通知しない
            tracing::warn!(
                "Private message to '{}' could not be delivered: {}",
                message.recipient(),
                e
            );
            return Ok(None);
        }

        tracing::info!(
            "Private message delivered - sender: {}, recipient: {}",
            message.sender(),
            message.recipient()
        );
        Ok(Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockMessagePusher, RoomRepository, Topic};
    use crate::usecase::{
        JoinChatUseCase,
        test_support::{Fixture, NOW, connection, room_name, username},
    };

    fn create_usecase(fx: &Fixture) -> SendPrivateMessageUseCase {
        SendPrivateMessageUseCase::new(
            fx.presence.clone(),
            fx.sessions.clone(),
            fx.pusher.clone(),
            fx.clock.clone(),
        )
    }

    fn create_join_usecase(fx: &Fixture) -> JoinChatUseCase {
        JoinChatUseCase::new(
            fx.presence.clone(),
            fx.rooms.clone(),
            fx.sessions.clone(),
            fx.pusher.clone(),
            fx.clock.clone(),
        )
    }

    fn content(text: &str) -> MessageContent {
        MessageContent::new(text.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_private_message_reaches_only_recipient() {
        // テスト項目: alice がルームに入室中に bob が送った個人宛メッセージは
        //             alice のキューにだけ 1 件届き、送信者は bob になる
        // given (前提条件):
        let fx = Fixture::new();
        let join = create_join_usecase(&fx);
        let usecase = create_usecase(&fx);
        let room = fx.rooms.create_room(room_name("R1")).await;

        let all_topics = [Topic::Public, Topic::Users, Topic::Room(room.id.clone())];
        let mut alice = fx.connect("alice-conn", &all_topics).await;
        let mut bob = fx.connect("bob-conn", &all_topics).await;
        let mut carol = fx.connect("carol-conn", &all_topics).await;
        join.execute(&connection("alice-conn"), username("alice"), Some(room.id.clone()))
            .await
            .unwrap();
        join.execute(&connection("bob-conn"), username("bob"), None)
            .await
            .unwrap();
        alice.drain();
        bob.drain();
        carol.drain();

        // when (操作):
        let result = usecase
            .execute(&connection("bob-conn"), username("alice"), content("hi alice"))
            .await;

        // then (期待する結果):
        let delivered = result.unwrap().unwrap();
        assert_eq!(delivered.sender(), &username("bob"));

        let frames = alice.drain();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].0, "/user/queue/messages");
        assert_eq!(frames[0].1["sender"], "bob");
        assert_eq!(frames[0].1["recipient"], "alice");
        assert_eq!(frames[0].1["content"], "hi alice");
        assert_eq!(frames[0].1["timestamp"], NOW);

        assert!(bob.drain().is_empty());
        assert!(carol.drain().is_empty());
    }

    #[tokio::test]
    async fn test_private_message_to_offline_user_is_silently_dropped() {
        // テスト項目: オフラインのユーザー宛の個人宛メッセージはどこにも配送されず、
        //             送信者にもエラーが返らない
        // given (前提条件):
        let fx = Fixture::new();
        fx.sessions
            .set_username(&connection("bob-conn"), username("bob"))
            .await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().times(0);
        pusher.expect_publish().times(0);
        let usecase = SendPrivateMessageUseCase::new(
            fx.presence.clone(),
            fx.sessions.clone(),
            Arc::new(pusher),
            fx.clock.clone(),
        );

        // when (操作):
        let result = usecase
            .execute(&connection("bob-conn"), username("ghost"), content("hello?"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_private_message_before_join_is_rejected() {
        // テスト項目: join 前のコネクションからの個人宛メッセージはエラーになる
        // given (前提条件):
        let fx = Fixture::new();
        fx.presence
            .add_user_with_connection(username("alice"), connection("alice-conn"))
            .await;
        let mut alice = fx.connect("alice-conn", &[]).await;
        let usecase = create_usecase(&fx);

        // when (操作):
        let result = usecase
            .execute(&connection("anon"), username("alice"), content("boo"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendPrivateMessageError::NotJoined));
        assert!(alice.drain().is_empty());
    }

    #[tokio::test]
    async fn test_private_message_to_stale_connection_is_dropped() {
        // テスト項目: 宛先のコネクションが既に閉じていても送信者にはエラーが返らない
        // given (前提条件):
        let fx = Fixture::new();
        fx.sessions
            .set_username(&connection("bob-conn"), username("bob"))
            .await;
        fx.presence
            .add_user_with_connection(username("alice"), connection("gone"))
            .await;
        let usecase = create_usecase(&fx);

        // when (操作):
        let result = usecase
            .execute(&connection("bob-conn"), username("alice"), content("hi"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }
}
