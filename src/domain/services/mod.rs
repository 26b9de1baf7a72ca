pub mod auth_service;
pub mod authz;
pub mod club_service;
pub mod post_service;
pub mod schedule_service;
