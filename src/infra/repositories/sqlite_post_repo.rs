use crate::domain::{
    models::post::{Post, PostDetail, PostListItem, PostListQuery, PostSort},
    ports::PostRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePostRepo {
    pool: SqlitePool,
}

impl SqlitePostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn order_clause(query: &PostListQuery) -> &'static str {
        // Notices sort ahead of everything unless the listing is already
        // restricted to notices.
        if query.only_notice {
            match query.sort {
                PostSort::Latest => "p.created_at DESC",
                PostSort::Oldest => "p.created_at ASC",
                PostSort::MostViewed => "p.view_count DESC, p.created_at DESC",
            }
        } else {
            match query.sort {
                PostSort::Latest => "p.is_notice DESC, p.created_at DESC",
                PostSort::Oldest => "p.is_notice DESC, p.created_at ASC",
                PostSort::MostViewed => "p.is_notice DESC, p.view_count DESC, p.created_at DESC",
            }
        }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepo {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, club_id, user_id, title, content, visibility, author_tier, is_notice, view_count, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&post.id)
            .bind(&post.club_id)
            .bind(&post.user_id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.visibility)
            .bind(&post.author_tier)
            .bind(post.is_notice)
            .bind(post.view_count)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_page(&self, club_id: &str, query: &PostListQuery) -> Result<(Vec<PostListItem>, i64), AppError> {
        let mut filter = String::from("p.club_id = ?");
        if query.only_notice {
            filter.push_str(" AND p.is_notice = 1");
        }
        if query.query.is_some() {
            filter.push_str(" AND (p.title LIKE ? OR p.content LIKE ?)");
        }

        let count_sql = format!("SELECT COUNT(*) FROM posts p WHERE {}", filter);
        let page_sql = format!(
            "SELECT p.id, p.title, p.created_at, p.updated_at, p.view_count,
                    u.name AS author_name, p.author_tier, p.visibility,
                    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
                    p.is_notice
             FROM posts p
             JOIN users u ON u.id = p.user_id
             WHERE {}
             ORDER BY {}
             LIMIT ? OFFSET ?",
            filter,
            Self::order_clause(query),
        );

        let pattern = query.query.as_ref().map(|q| format!("%{}%", q));
        let offset = (query.page - 1) * query.page_size;

        // Count and page share one transaction so pagination cannot drift
        // against concurrent writes.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(club_id);
        if let Some(ref pattern) = pattern {
            count_query = count_query.bind(pattern).bind(pattern);
        }
        let total_count = count_query
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let mut page_query = sqlx::query_as::<_, PostListItem>(&page_sql).bind(club_id);
        if let Some(ref pattern) = pattern {
            page_query = page_query.bind(pattern).bind(pattern);
        }
        let items = page_query
            .bind(query.page_size)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok((items, total_count))
    }

    async fn increment_view_and_fetch(&self, id: &str) -> Result<Option<PostDetail>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let detail = sqlx::query_as::<_, PostDetail>(
            "SELECT p.id, p.club_id, p.title, p.content, p.visibility, p.is_notice,
                    p.view_count, p.created_at, p.updated_at,
                    p.user_id AS author_id, u.name AS author_name, p.author_tier
             FROM posts p
             JOIN users u ON u.id = p.user_id
             WHERE p.id = ?",
        )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(detail)
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = ?, content = ?, visibility = ?, is_notice = ?, updated_at = ?
             WHERE id = ? RETURNING *",
        )
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.visibility)
            .bind(post.is_notice)
            .bind(post.updated_at)
            .bind(&post.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }
        Ok(())
    }
}
