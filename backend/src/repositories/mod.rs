pub mod access_log;
pub mod comment;
pub mod user;
pub mod user_repository;

pub use user_repository::{PgUserRepository, UserRepository};
