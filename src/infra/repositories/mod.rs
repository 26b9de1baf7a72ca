pub mod sqlite_user_repo;
pub mod sqlite_club_repo;
pub mod sqlite_membership_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_post_repo;
pub mod sqlite_comment_repo;
pub mod sqlite_auth_repo;

pub mod postgres_user_repo;
pub mod postgres_club_repo;
pub mod postgres_membership_repo;
pub mod postgres_schedule_repo;
pub mod postgres_post_repo;
pub mod postgres_comment_repo;
pub mod postgres_auth_repo;
