use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{delete, patch},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, middleware, state::AppState};

/// Admin routes (auth + admin role), each call written to the access log.
///
/// Route layers run outermost-last: `auth_admin` resolves the principal before
/// `access_log` sees the request.
pub fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/comments/{comment_id}",
            delete(handlers::admin::delete_comment),
        )
        .route(
            "/admin/users/{user_id}",
            patch(handlers::admin::change_user_role),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.access_log.clone(),
            middleware::access_log,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.config.clone(),
            middleware::auth_admin,
        ))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(admin_routes(&state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PATCH,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
