use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppError, repositories::comment as comment_repo, state::AppState, types::CommentId,
};

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<CommentId>,
) -> Result<StatusCode, AppError> {
    let deleted = comment_repo::delete_comment(&state.pool, comment_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }
    Ok(StatusCode::OK)
}
