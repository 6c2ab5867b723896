//! Shared application state and dependency wiring.

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::{
    domain::{MessagePusher, PresenceRegistry, RoomRepository, SessionStore},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryPresenceRegistry, InMemoryRoomRepository, InMemorySessionStore},
    },
    usecase::{
        ConnectSessionUseCase, CreateRoomUseCase, DisconnectSessionUseCase, GetOnlineUsersUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, JoinChatUseCase, SendMessageUseCase,
        SendPrivateMessageUseCase,
    },
};

use super::dispatch::DestinationTable;

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（コネクション確立のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// SendMessageUseCase（公開チャット・ルームへの送信）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// JoinChatUseCase（入室のユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendPrivateMessageUseCase（個人宛メッセージ送信）
    pub send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// MessagePusher（購読の登録・解除とエラー通知に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// Inbound destination table, built once at startup
    pub destinations: DestinationTable,
}

impl AppState {
    /// Wire the in-memory registries and the WebSocket message pusher
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_components(
            Arc::new(InMemoryPresenceRegistry::new()),
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(WebSocketMessagePusher::new()),
            clock,
        )
    }

    /// Wire the use cases on top of the given registries and pusher
    ///
    /// Initialization order:
    /// 1. Registries
    /// 2. MessagePusher
    /// 3. UseCases
    pub fn with_components(
        presence: Arc<dyn PresenceRegistry>,
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_session_usecase: Arc::new(ConnectSessionUseCase::new(message_pusher.clone())),
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
                presence.clone(),
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                rooms.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            join_chat_usecase: Arc::new(JoinChatUseCase::new(
                presence.clone(),
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            send_private_message_usecase: Arc::new(SendPrivateMessageUseCase::new(
                presence.clone(),
                sessions,
                message_pusher.clone(),
                clock,
            )),
            get_online_users_usecase: Arc::new(GetOnlineUsersUseCase::new(presence)),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(rooms.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(rooms.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(rooms)),
            message_pusher,
            destinations: DestinationTable::new(),
        }
    }
}
