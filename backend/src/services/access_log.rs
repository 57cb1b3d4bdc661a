use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;

use crate::{
    models::access_log::{AccessLog, NewAccessLog},
    repositories::access_log as access_log_repo,
};

/// Durable sink for admin access log entries.
///
/// Implementations append exactly one row per call and never update or
/// delete existing rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRecorder: Send + Sync {
    async fn record(&self, entry: NewAccessLog) -> Result<AccessLog, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct AccessLogService {
    pool: PgPool,
}

impl AccessLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogRecorder for AccessLogService {
    async fn record(&self, entry: NewAccessLog) -> Result<AccessLog, sqlx::Error> {
        let span = tracing::debug_span!("access_log_insert", user_id = %entry.user_id);
        access_log_repo::insert_access_log(&self.pool, &entry)
            .instrument(span)
            .await
    }
}
