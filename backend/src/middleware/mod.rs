pub mod access_log;
pub mod auth;
pub mod replay;
pub mod request_id;

pub use access_log::*;
pub use auth::*;
pub use request_id::*;
