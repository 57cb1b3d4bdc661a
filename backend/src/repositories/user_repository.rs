//! User directory used to resolve the acting principal of an admin request.
//!
//! The trait is mockable with mockall; use `MockUserRepository` in tests.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::user::User;
use crate::repositories::user as user_repo;
use crate::types::UserId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID, returning `None` when no row exists.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;
}

/// PostgreSQL-backed user directory.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(user_repo::fetch_user(&self.pool, id).await?)
    }
}
