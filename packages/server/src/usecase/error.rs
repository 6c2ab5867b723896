//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::ValueObjectError;

/// チャットメッセージ送信のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(String),
}

/// 入室（join）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinError {
    /// このコネクションは既に join 済み
    #[error("this connection has already joined as '{0}'")]
    AlreadyJoined(String),

    #[error("failed to broadcast join message: {0}")]
    BroadcastFailed(String),
}

/// 個人宛メッセージ送信のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendPrivateMessageError {
    /// 送信者がまだ join していない（送信者名が決まらない）
    #[error("join the chat before sending private messages")]
    NotJoined,
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}

/// ルーム作成のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateRoomError {
    #[error("invalid room name: {0}")]
    InvalidName(#[from] ValueObjectError),
}
