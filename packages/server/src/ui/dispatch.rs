//! Inbound destination table.
//!
//! Maps `/app/...` destinations to the operation that handles them. Patterns
//! are parsed once when the table is built; resolving a destination is a
//! linear scan over a handful of entries.

use crate::domain::RoomId;

const ROOM_ID_PARAM: &str = "{roomId}";

/// Operation kinds that inbound destinations are routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    SendPublic,
    SendRoom,
    JoinPublic,
    JoinRoom,
    SendPrivate,
}

/// Resolved inbound route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    SendPublic,
    SendRoom(RoomId),
    JoinPublic,
    JoinRoom(RoomId),
    SendPrivate,
}

#[derive(Debug, Clone)]
enum Pattern {
    Exact(&'static str),
    /// Fixed prefix followed by a single `{roomId}` segment
    WithRoomId(&'static str),
}

#[derive(Debug, Clone)]
pub struct DestinationTable {
    entries: Vec<(Pattern, RouteKind)>,
}

impl DestinationTable {
    pub fn new() -> Self {
        let mut table = Self {
            entries: Vec::new(),
        };
        table.register("/app/chat.sendMessage", RouteKind::SendPublic);
        table.register("/app/chat.sendMessage/{roomId}", RouteKind::SendRoom);
        table.register("/app/chat.addUser", RouteKind::JoinPublic);
        table.register("/app/chat.addUser/{roomId}", RouteKind::JoinRoom);
        table.register("/app/chat.private", RouteKind::SendPrivate);
        table
    }

    fn register(&mut self, pattern: &'static str, kind: RouteKind) {
        let pattern = match pattern.strip_suffix(ROOM_ID_PARAM) {
            Some(prefix) => Pattern::WithRoomId(prefix),
            None => Pattern::Exact(pattern),
        };
        self.entries.push((pattern, kind));
    }

    /// Resolve a destination. Unknown destinations yield `None`.
    pub fn resolve(&self, destination: &str) -> Option<AppRoute> {
        self.entries.iter().find_map(|(pattern, kind)| {
            let room_id = match pattern {
                Pattern::Exact(path) => {
                    if destination != *path {
                        return None;
                    }
                    None
                }
                Pattern::WithRoomId(prefix) => {
                    let id = destination.strip_prefix(prefix)?;
                    if id.contains('/') {
                        return None;
                    }
                    Some(RoomId::new(id.to_string()).ok()?)
                }
            };
            Some(match (kind, room_id) {
                (RouteKind::SendPublic, _) => AppRoute::SendPublic,
                (RouteKind::JoinPublic, _) => AppRoute::JoinPublic,
                (RouteKind::SendPrivate, _) => AppRoute::SendPrivate,
                (RouteKind::SendRoom, Some(id)) => AppRoute::SendRoom(id),
                (RouteKind::JoinRoom, Some(id)) => AppRoute::JoinRoom(id),
                (RouteKind::SendRoom | RouteKind::JoinRoom, None) => return None,
            })
        })
    }
}

impl Default for DestinationTable {
    fn default() -> Self {
        Self::new()
    }
}
