use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, ClubRepository, CommentRepository, MembershipRepository,
    PostRepository, ScheduleRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::authz::Authorizer;
use crate::domain::services::club_service::ClubService;
use crate::domain::services::post_service::PostService;
use crate::domain::services::schedule_service::ScheduleService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub club_repo: Arc<dyn ClubRepository>,
    pub membership_repo: Arc<dyn MembershipRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub post_repo: Arc<dyn PostRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub authorizer: Arc<Authorizer>,
    pub club_service: Arc<ClubService>,
    pub schedule_service: Arc<ScheduleService>,
    pub post_service: Arc<PostService>,
    pub auth_service: Arc<AuthService>,
}
