//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Chat room as exposed by the room API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomDto {
    pub id: String,
    pub name: String,
    pub user_count: u32,
}

/// Query parameters for room creation (`POST /api/rooms?name=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomQuery {
    pub name: String,
}
