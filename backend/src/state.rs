use std::sync::Arc;

use crate::{
    config::{AccessLogSettings, Config},
    db::connection::DbPool,
    repositories::{PgUserRepository, UserRepository},
    services::{AccessLogRecorder, AccessLogService},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub access_log: AccessLogState,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        let access_log = AccessLogState::new(
            config.access_log_settings(),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(AccessLogService::new(pool.clone())),
        );
        Self {
            pool,
            config,
            access_log,
        }
    }
}

/// Collaborators of the access log middleware.
#[derive(Clone)]
pub struct AccessLogState {
    pub settings: AccessLogSettings,
    pub users: Arc<dyn UserRepository>,
    pub recorder: Arc<dyn AccessLogRecorder>,
}

impl AccessLogState {
    pub fn new(
        settings: AccessLogSettings,
        users: Arc<dyn UserRepository>,
        recorder: Arc<dyn AccessLogRecorder>,
    ) -> Self {
        Self {
            settings,
            users,
            recorder,
        }
    }
}
