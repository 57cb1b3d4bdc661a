//! Repository functions for user rows.

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    models::user::{User, UserRole},
    types::UserId,
};

pub async fn fetch_user(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
    // Normalize role casing at read to be resilient to legacy rows
    sqlx::query_as::<_, User>(
        "SELECT id, email, nickname, LOWER(role) AS role, created_at, updated_at \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Changes a user's role, returning the updated row or `None` if the user
/// does not exist.
pub async fn update_user_role(
    pool: &PgPool,
    id: UserId,
    role: UserRole,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET role = $1, updated_at = $2 WHERE id = $3 \
         RETURNING id, email, nickname, LOWER(role) AS role, created_at, updated_at",
    )
    .bind(role.as_str())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}
