use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    models::user::User,
    types::{AccessLogId, UserId},
};

/// Body text stored when the request payload could not be captured.
pub const NO_REQUEST_BODY: &str = "No Request Body";
/// Body text stored when the handler produced no response payload.
pub const NO_RESPONSE_BODY: &str = "No Response Body";
/// Appended to a response payload cut at the capture limit.
pub const TRUNCATED_BODY_MARKER: &str = "...[truncated]";

/// A persisted row of `admin_access_log`. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessLog {
    pub id: AccessLogId,
    pub user_id: UserId,
    pub request_time: DateTime<Utc>,
    pub request_url: String,
    pub request_body: Option<String>,
    pub response_body: Option<String>,
}

/// An access log entry captured by the middleware, not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessLog {
    pub user_id: UserId,
    pub request_time: DateTime<Utc>,
    pub request_url: String,
    pub request_body: String,
    pub response_body: String,
}

impl NewAccessLog {
    /// Binds the entry to the user resolved at capture time.
    pub fn new(
        user: &User,
        request_time: DateTime<Utc>,
        request_url: String,
        request_body: String,
        response_body: String,
    ) -> Self {
        Self {
            user_id: user.id,
            request_time,
            request_url,
            request_body,
            response_body,
        }
    }

    /// Attaches the identity assigned by the store.
    pub fn into_persisted(self, id: AccessLogId) -> AccessLog {
        AccessLog {
            id,
            user_id: self.user_id,
            request_time: self.request_time,
            request_url: self.request_url,
            request_body: Some(self.request_body),
            response_body: Some(self.response_body),
        }
    }
}
