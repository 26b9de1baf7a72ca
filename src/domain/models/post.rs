use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Post visibility label, validated at the request boundary.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostVisibility {
    All,
    Junior,
    Senior,
    Manager,
}

impl PostVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostVisibility::All => "ALL",
            PostVisibility::Junior => "JUNIOR",
            PostVisibility::Senior => "SENIOR",
            PostVisibility::Manager => "MANAGER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Latest,
    Oldest,
    MostViewed,
}

impl PostSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(PostSort::Latest),
            "oldest" => Some(PostSort::Oldest),
            "mostViewed" => Some(PostSort::MostViewed),
            _ => None,
        }
    }
}

/// A club board post. `author_tier` is the author's tier captured at
/// creation time and never recomputed afterwards; it is an audit snapshot
/// of "what tier were they when they posted", not a live join.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Post {
    pub id: String,
    pub club_id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub visibility: String,
    pub author_tier: String,
    pub is_notice: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        club_id: String,
        user_id: String,
        title: String,
        content: String,
        visibility: String,
        author_tier: String,
        is_notice: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            club_id,
            user_id,
            title,
            content,
            visibility,
            author_tier,
            is_notice,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One row of the paginated board listing, joined with the author's name
/// and the comment count.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct PostListItem {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: i32,
    pub author_name: String,
    pub author_tier: String,
    pub visibility: String,
    pub comment_count: i64,
    pub is_notice: bool,
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct PostDetail {
    pub id: String,
    pub club_id: String,
    pub title: String,
    pub content: String,
    pub visibility: String,
    pub is_notice: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: String,
    pub author_name: String,
    pub author_tier: String,
}

/// Normalized listing parameters, after the service has applied the
/// page floor and page-size clamp.
#[derive(Debug, Clone)]
pub struct PostListQuery {
    pub page: i64,
    pub page_size: i64,
    pub sort: PostSort,
    pub query: Option<String>,
    pub only_notice: bool,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total_count: i64,
    pub total_pages: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub items: Vec<PostListItem>,
    pub pagination: Pagination,
}
