use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{
    config::Config,
    models::user::UserRole,
    types::UserId,
    utils::jwt::{verify_access_token, Claims},
};

/// The principal id resolved from the bearer token of the current request.
///
/// Inserted into the request extensions by [`auth_admin`]; the user row it
/// names may no longer exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUserId(pub UserId);

// Auth + require admin role for `/admin` routes
pub async fn auth_admin(
    State(config): State<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = authenticate_request(request.headers(), &config)?;
    if claims.role() != Some(UserRole::Admin) {
        return Err(StatusCode::FORBIDDEN);
    }
    let user_id = claims.user_id().ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(CurrentUserId(user_id));
    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        let token = rest.trim();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

fn authenticate_request(headers: &HeaderMap, config: &Config) -> Result<Claims, StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    verify_access_token(token, &config.jwt_secret).map_err(|err| {
        tracing::debug!(error = %err, "Rejected bearer token");
        StatusCode::UNAUTHORIZED
    })
}
