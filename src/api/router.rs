use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, club, comment, health, member, post as post_handlers, schedule};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))

        // Clubs
        .route("/api/clubs", get(club::list_clubs).post(club::create_club))
        .route("/api/clubs/my", get(club::list_my_clubs))
        .route("/api/clubs/{club_id}", get(club::get_club))
        .route("/api/clubs/{club_id}/join", post(club::request_join))

        // Membership administration
        .route("/api/clubs/{club_id}/requests", get(member::list_join_requests))
        .route("/api/clubs/{club_id}/members/{member_id}/approve", post(member::approve_member))
        .route("/api/clubs/{club_id}/members/{member_id}/reject", post(member::reject_member))
        .route("/api/clubs/{club_id}/members", get(member::list_members))
        .route("/api/clubs/{club_id}/members/{member_id}", get(member::get_member).patch(member::update_member).delete(member::remove_member))

        // Schedules
        .route("/api/clubs/{club_id}/schedules", get(schedule::list_schedules).post(schedule::create_schedule))
        .route("/api/clubs/{club_id}/schedules/{schedule_id}", axum::routing::patch(schedule::update_schedule).delete(schedule::delete_schedule))

        // Posts
        .route("/api/clubs/{club_id}/posts", get(post_handlers::list_posts).post(post_handlers::create_post))
        .route("/api/clubs/{club_id}/posts/{post_id}", get(post_handlers::get_post).put(post_handlers::update_post).delete(post_handlers::delete_post))
        .route("/api/posts/{post_id}", get(post_handlers::get_post_direct))

        // Comments
        .route("/api/posts/{post_id}/comments", get(comment::list_comments).post(comment::create_comment))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
