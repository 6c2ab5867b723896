//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの検証エラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username is too long ({actual} > {max} characters)")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("message content must not be empty")]
    EmptyContent,

    #[error("message content is too long ({actual} > {max} characters)")]
    ContentTooLong { max: usize, actual: usize },

    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room name is too long ({actual} > {max} characters)")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("connection id must not be empty")]
    EmptyConnectionId,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 宛先のコネクションが登録されていない
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    /// チャンネルへの送信に失敗した（受信側が閉じている）
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// ペイロードのシリアライズに失敗した
    #[error("failed to serialize message: {0}")]
    Serialization(String),
}
