use admin_access_log::{
    config::AccessLogSettings,
    middleware::{access_log, auth_admin, request_id},
    models::user::UserRole,
    types::UserId,
    utils::jwt::create_access_token,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware as axum_middleware,
    routing::delete,
    Router,
};
use tower::ServiceExt;

#[path = "support/mod.rs"]
mod support;

use support::{InMemoryRecorder, InMemoryUsers, JWT_SECRET};

fn app(recorder: &InMemoryRecorder) -> Router {
    let users = InMemoryUsers::with([
        support::user(7, UserRole::Admin),
        support::user(8, UserRole::User),
    ]);
    Router::new()
        .route(
            "/admin/comments/{comment_id}",
            delete(|| async { "deleted" }),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            support::access_log_state(users, recorder, AccessLogSettings::default()),
            access_log,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            support::test_config(),
            auth_admin,
        ))
        .layer(axum_middleware::from_fn(request_id))
}

fn token_for(user_id: i64, role: UserRole) -> String {
    create_access_token(
        UserId::new(user_id),
        format!("user{user_id}@example.com"),
        role,
        JWT_SECRET,
        1,
    )
    .expect("create token")
}

fn delete_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("DELETE")
        .uri("/admin/comments/5")
        .header("x-request-id", "req-access-log");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("build request")
}

#[tokio::test]
async fn admin_token_is_attributed_to_its_user() {
    let recorder = InMemoryRecorder::default();
    let token = token_for(7, UserRole::Admin);

    let response = app(&recorder)
        .oneshot(delete_request(Some(&token)))
        .await
        .expect("call app");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok()),
        Some("req-access-log")
    );
    let rows = recorder.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, UserId::new(7));
    assert_eq!(rows[0].request_url, "/admin/comments/5");
    assert_eq!(rows[0].response_body.as_deref(), Some("deleted"));
}

#[tokio::test]
async fn admin_token_for_deleted_user_is_served_but_not_recorded() {
    let recorder = InMemoryRecorder::default();
    let token = token_for(99, UserRole::Admin);

    let response = app(&recorder)
        .oneshot(delete_request(Some(&token)))
        .await
        .expect("call app");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(recorder.rows().is_empty());
}

#[tokio::test]
async fn non_admin_token_is_forbidden_before_capture() {
    let recorder = InMemoryRecorder::default();
    let token = token_for(8, UserRole::User);

    let response = app(&recorder)
        .oneshot(delete_request(Some(&token)))
        .await
        .expect("call app");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(recorder.rows().is_empty());
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let recorder = InMemoryRecorder::default();

    let response = app(&recorder)
        .oneshot(delete_request(None))
        .await
        .expect("call app");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(recorder.rows().is_empty());
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let recorder = InMemoryRecorder::default();
    let token = create_access_token(
        UserId::new(7),
        "user7@example.com".into(),
        UserRole::Admin,
        "some_other_secret_that_is_long_enough",
        1,
    )
    .expect("create token");

    let response = app(&recorder)
        .oneshot(delete_request(Some(&token)))
        .await
        .expect("call app");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(recorder.rows().is_empty());
}
