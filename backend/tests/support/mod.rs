#![allow(dead_code)]
//! In-memory collaborators for exercising the access log middleware without a
//! database.

use admin_access_log::{
    config::{AccessLogSettings, AdminRouteGroup, Config},
    error::AppError,
    models::{
        access_log::{AccessLog, NewAccessLog},
        user::{User, UserRole},
    },
    repositories::UserRepository,
    services::AccessLogRecorder,
    state::AccessLogState,
    types::{AccessLogId, UserId},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub const JWT_SECRET: &str = "a_secure_token_that_is_long_enough_123";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/admin_access_log_test".into(),
        server_addr: "127.0.0.1:0".parse().expect("socket addr"),
        jwt_secret: JWT_SECRET.into(),
        jwt_expiration_hours: 1,
        access_log_enabled: true,
        access_log_max_body_bytes: 64 * 1024,
        access_log_route_groups: AdminRouteGroup::ALL.to_vec(),
    }
}

pub fn user(id: i64, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id),
        email: format!("user{id}@example.com"),
        nickname: format!("user{id}"),
        role,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: HashMap<UserId, User>,
}

impl InMemoryUsers {
    pub fn with(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).cloned())
    }
}

/// Append-only store that can be switched into a failing mode.
#[derive(Clone, Default)]
pub struct InMemoryRecorder {
    rows: Arc<Mutex<Vec<AccessLog>>>,
    unavailable: bool,
}

impl InMemoryRecorder {
    pub fn unavailable() -> Self {
        Self {
            rows: Arc::default(),
            unavailable: true,
        }
    }

    pub fn rows(&self) -> Vec<AccessLog> {
        self.rows.lock().expect("lock rows").clone()
    }
}

#[async_trait]
impl AccessLogRecorder for InMemoryRecorder {
    async fn record(&self, entry: NewAccessLog) -> Result<AccessLog, sqlx::Error> {
        if self.unavailable {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let mut rows = self.rows.lock().expect("lock rows");
        let id = AccessLogId::new(rows.len() as i64 + 1);
        let saved = entry.into_persisted(id);
        rows.push(saved.clone());
        Ok(saved)
    }
}

pub fn access_log_state(
    users: InMemoryUsers,
    recorder: &InMemoryRecorder,
    settings: AccessLogSettings,
) -> AccessLogState {
    AccessLogState::new(settings, Arc::new(users), Arc::new(recorder.clone()))
}
