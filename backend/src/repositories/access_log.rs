use sqlx::PgPool;

use crate::models::access_log::{AccessLog, NewAccessLog};

/// Appends one row to `admin_access_log` and returns it with its generated id.
pub async fn insert_access_log(pool: &PgPool, log: &NewAccessLog) -> Result<AccessLog, sqlx::Error> {
    sqlx::query_as::<_, AccessLog>(
        "INSERT INTO admin_access_log \
         (user_id, request_time, request_url, request_body, response_body) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, user_id, request_time, request_url, request_body, response_body",
    )
    .bind(log.user_id)
    .bind(log.request_time)
    .bind(&log.request_url)
    .bind(&log.request_body)
    .bind(&log.response_body)
    .fetch_one(pool)
    .await
}
