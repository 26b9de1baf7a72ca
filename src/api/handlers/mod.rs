pub mod auth;
pub mod club;
pub mod comment;
pub mod health;
pub mod member;
pub mod post;
pub mod schedule;
