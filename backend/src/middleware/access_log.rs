//! Access logging for the admin route groups.
//!
//! Every request that reaches a recorded admin route is captured (entry time,
//! path, request payload), attributed to the principal placed in the request
//! extensions by [`auth_admin`](crate::middleware::auth::auth_admin), and,
//! once the handler has succeeded, written through the
//! [`AccessLogRecorder`] together with the response payload. The handler's
//! response is returned as-is in every case; failures on the logging path are
//! logged and dropped.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::{
    middleware::{
        auth::CurrentUserId,
        replay::{capture_request_body, capture_response_body, CapturedBody},
        request_id::RequestId,
    },
    models::{
        access_log::{NewAccessLog, NO_REQUEST_BODY, NO_RESPONSE_BODY, TRUNCATED_BODY_MARKER},
        user::User,
    },
    repositories::UserRepository,
    services::AccessLogRecorder,
    state::AccessLogState,
    types::UserId,
};

pub async fn access_log(
    State(state): State<AccessLogState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.settings.is_recording_enabled() {
        return next.run(request).await;
    }

    let request_url = request.uri().path().to_string();
    let Some(route_group) = state.settings.intercepts(&request_url) else {
        return next.run(request).await;
    };

    let request_time = Utc::now();
    let (request, request_capture) =
        capture_request_body(request, state.settings.max_body_bytes).await;
    let request_body = render_request_body(&request_capture);

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone());
    let user_id = request
        .extensions()
        .get::<CurrentUserId>()
        .map(|current| current.0);

    let Some(user) = resolve_user(state.users.as_ref(), user_id).await else {
        return next.run(request).await;
    };

    let response = next.run(request).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        tracing::debug!(
            status = status.as_u16(),
            request_url = %request_url,
            "Admin operation failed, access log skipped"
        );
        return response;
    }

    let (response, response_capture) =
        capture_response_body(response, state.settings.max_body_bytes).await;
    let response_body = render_response_body(&response_capture);

    tracing::info!(
        user_id = %user.id,
        request_time = %request_time,
        request_url = %request_url,
        request_body = %request_body,
        response_body = %response_body,
        route_group = %route_group,
        request_id = request_id.as_deref().unwrap_or("-"),
        "Admin access captured"
    );

    let entry = NewAccessLog::new(&user, request_time, request_url, request_body, response_body);
    record_entry(state.recorder.as_ref(), entry).await;

    response
}

async fn resolve_user(users: &dyn UserRepository, user_id: Option<UserId>) -> Option<User> {
    let Some(user_id) = user_id else {
        tracing::warn!("User not found for ID: <missing>");
        return None;
    };

    match users.find_by_id(user_id).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            tracing::warn!(user_id = %user_id, "User not found for ID: {}", user_id);
            None
        }
        Err(err) => {
            tracing::warn!(
                error = ?err,
                user_id = %user_id,
                "Failed to resolve user for access log"
            );
            None
        }
    }
}

async fn record_entry(recorder: &dyn AccessLogRecorder, entry: NewAccessLog) {
    let user_id = entry.user_id;
    let request_url = entry.request_url.clone();

    match recorder.record(entry).await {
        Ok(saved) => {
            tracing::debug!(
                access_log_id = %saved.id,
                user_id = %user_id,
                request_url = %request_url,
                "Admin access log recorded"
            );
        }
        Err(err) => {
            tracing::error!(
                error = ?err,
                user_id = %user_id,
                request_url = %request_url,
                "Failed to record admin access log"
            );
        }
    }
}

// A request cut at the capture limit is stored as the placeholder.
fn render_request_body(captured: &CapturedBody) -> String {
    match captured.complete() {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => NO_REQUEST_BODY.to_string(),
    }
}

fn render_response_body(captured: &CapturedBody) -> String {
    match captured {
        CapturedBody::Complete(bytes) if !bytes.is_empty() => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        CapturedBody::Truncated(prefix) => {
            let mut text = String::from_utf8_lossy(prefix).into_owned();
            text.push_str(TRUNCATED_BODY_MARKER);
            text
        }
        _ => NO_RESPONSE_BODY.to_string(),
    }
}
