//! Utilities shared by the Agora server and client binaries.

pub mod logger;
pub mod time;
