//! インメモリ実装
//!
//! DashMap を共有ストアとして使用します。プロセスの再起動で全てのデータは失われます。

pub mod presence;
pub mod room;
pub mod session;

pub use presence::InMemoryPresenceRegistry;
pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionStore;
