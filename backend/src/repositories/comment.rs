use sqlx::PgPool;

use crate::types::CommentId;

/// Deletes a comment. Returns `false` when no row matched.
pub async fn delete_comment(pool: &PgPool, id: CommentId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
