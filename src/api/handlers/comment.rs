use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateCommentRequest;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comments = state.post_service.list_comments(&post_id, &user.0.id).await?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(post_id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("Comment content is required".into()));
    }

    let comment = state.post_service
        .create_comment(&post_id, &user.0.id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
