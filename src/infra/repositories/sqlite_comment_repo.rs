use crate::domain::{
    models::comment::{Comment, CommentView},
    ports::CommentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCommentRepo {
    pool: SqlitePool,
}

impl SqliteCommentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepo {
    async fn create(&self, comment: &Comment) -> Result<CommentView, AppError> {
        sqlx::query(
            "INSERT INTO comments (id, post_id, user_id, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
            .bind(&comment.id)
            .bind(&comment.post_id)
            .bind(&comment.user_id)
            .bind(&comment.content)
            .bind(comment.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        sqlx::query_as::<_, CommentView>(
            "SELECT c.id, c.post_id, c.user_id, u.name AS author_name, c.content, c.created_at
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.id = ?",
        )
            .bind(&comment.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_post(&self, post_id: &str) -> Result<Vec<CommentView>, AppError> {
        sqlx::query_as::<_, CommentView>(
            "SELECT c.id, c.post_id, c.user_id, u.name AS author_name, c.content, c.created_at
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.post_id = ?
             ORDER BY c.created_at ASC",
        )
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
