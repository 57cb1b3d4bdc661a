use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::{UserResponse, UserRole},
    repositories::user as user_repo,
    state::AppState,
    types::UserId,
    validation::{rules, Validate},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserRoleChangeRequest {
    #[validate(custom(function = "rules::validate_user_role"))]
    pub role: String,
}

pub async fn change_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(payload): Json<UserRoleChangeRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;
    let role = UserRole::parse(&payload.role)
        .ok_or_else(|| AppError::Validation(vec!["role: invalid_user_role".to_string()]))?;

    let user = user_repo::update_user_role(&state.pool, user_id, role)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_change_request_validates_role_name() {
        let valid = UserRoleChangeRequest {
            role: "admin".into(),
        };
        assert!(valid.validate().is_ok());

        let invalid = UserRoleChangeRequest {
            role: "owner".into(),
        };
        let err: AppError = invalid.validate().unwrap_err().into();
        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages, vec!["role: invalid_user_role".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
