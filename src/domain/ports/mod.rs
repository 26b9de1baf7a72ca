use crate::domain::models::{
    auth::RefreshTokenRecord,
    club::{Club, ClubSummary},
    comment::{Comment, CommentView},
    membership::{MemberView, Membership},
    post::{Post, PostDetail, PostListItem, PostListQuery},
    schedule::Schedule,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Creates the club together with its founding LEADER membership in a
    /// single transaction.
    async fn create_with_leader(&self, club: &Club, leader: &Membership) -> Result<Club, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Club>, AppError>;
    async fn list_all(&self) -> Result<Vec<Club>, AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ClubSummary>, AppError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn create(&self, membership: &Membership) -> Result<Membership, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Membership>, AppError>;
    async fn find_by_user_and_club(&self, user_id: &str, club_id: &str) -> Result<Option<Membership>, AppError>;
    async fn list_pending(&self, club_id: &str) -> Result<Vec<MemberView>, AppError>;
    async fn list_approved(&self, club_id: &str) -> Result<Vec<MemberView>, AppError>;
    async fn find_member_view(&self, id: &str, club_id: &str) -> Result<Option<MemberView>, AppError>;
    /// Atomic approve-if-pending. Returns `None` when the row was already
    /// approved (or gone), so a concurrent double-approve resolves as one
    /// success and one conflict.
    async fn approve_if_pending(&self, id: &str) -> Result<Option<Membership>, AppError>;
    async fn update_role_tier(&self, id: &str, role: &str, tier: &str) -> Result<Membership, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError>;
    /// Range filter is an interval-overlap test: `end_at >= from` and
    /// `start_at <= to`, each applied only when supplied.
    async fn list_by_club(
        &self,
        club_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> Result<Vec<Schedule>, AppError>;
    async fn update(&self, schedule: &Schedule) -> Result<Schedule, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<Post, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError>;
    /// Count and page are read under one transaction so the pagination
    /// header stays consistent with the returned items.
    async fn list_page(&self, club_id: &str, query: &PostListQuery) -> Result<(Vec<PostListItem>, i64), AppError>;
    /// Bumps the view counter by exactly one and returns the detail row.
    async fn increment_view_and_fetch(&self, id: &str) -> Result<Option<PostDetail>, AppError>;
    async fn update(&self, post: &Post) -> Result<Post, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<CommentView, AppError>;
    async fn list_by_post(&self, post_id: &str) -> Result<Vec<CommentView>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: &str) -> Result<(), AppError>;
}
