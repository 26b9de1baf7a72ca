use crate::domain::models::membership::{ClubRole, MemberTier};
use crate::domain::models::post::PostVisibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Distinguishes an omitted field from an explicit `null`: `None` means
/// "leave unchanged", `Some(None)` means "clear".
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateMemberRequest {
    pub role: Option<ClubRole>,
    pub tier: Option<MemberTier>,
}

#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateScheduleRequest {
    pub title: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub content: Option<Option<String>>,
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub visibility: PostVisibility,
    pub is_notice: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub visibility: Option<PostVisibility>,
    pub is_notice: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Deserialize)]
pub struct ScheduleListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct PostListQueryParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub only_notice: Option<bool>,
}
