//! UseCase 層
//!
//! 受信イベントごとに 1 つのユースケースを用意し、
//! 「どのレジストリをどう更新し、どこに何を配送するか」を決めます。
//! レジストリと MessagePusher はコンストラクタで注入されます。

mod connect_session;
mod create_room;
mod disconnect_session;
mod error;
mod get_online_users;
mod get_room_detail;
mod get_rooms;
mod join_chat;
mod send_message;
mod send_private_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_session::ConnectSessionUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{
    CreateRoomError, GetRoomDetailError, JoinError, SendMessageError, SendPrivateMessageError,
};
pub use get_online_users::GetOnlineUsersUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_chat::JoinChatUseCase;
pub use send_message::SendMessageUseCase;
pub use send_private_message::SendPrivateMessageUseCase;
