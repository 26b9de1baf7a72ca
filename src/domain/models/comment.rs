use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A comment under a post. Visible to anyone who can see the parent post;
/// no comment-level visibility control exists.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: String, user_id: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id,
            user_id,
            content,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
