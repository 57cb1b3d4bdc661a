//! Data models shared across database access and API handlers.

pub mod access_log;
pub mod user;
