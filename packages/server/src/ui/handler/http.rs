//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::{
        http::{ChatRoomDto, CreateRoomQuery},
        websocket::{ErrorMessage, OnlineUsersMessage},
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<ChatRoomDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(ChatRoomDto::from).collect())
}

/// Create a room (`POST /api/rooms?name=...`)
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreateRoomQuery>,
) -> Result<Json<ChatRoomDto>, (StatusCode, Json<ErrorMessage>)> {
    match state.create_room_usecase.execute(query.name).await {
        Ok(room) => Ok(Json(ChatRoomDto::from(&room))),
        Err(e) => {
            tracing::warn!("Rejected room creation: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorMessage {
                    message: e.to_string(),
                }),
            ))
        }
    }
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<ChatRoomDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(ChatRoomDto::from(&room))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}

/// Get the online user snapshot
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<OnlineUsersMessage> {
    let snapshot = state.get_online_users_usecase.execute().await;
    Json(OnlineUsersMessage::from(&snapshot))
}
