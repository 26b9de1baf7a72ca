use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreatePostRequest, PostListQueryParams, UpdatePostRequest};
use crate::domain::models::post::PostSort;
use crate::domain::services::post_service::{CreatePostInput, ListPostsInput, PostPatch};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
    Query(params): Query<PostListQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let sort = match params.sort.as_deref() {
        None => PostSort::Latest,
        Some(raw) => PostSort::parse(raw)
            .ok_or(AppError::Validation("sort must be one of latest, oldest, mostViewed".into()))?,
    };

    let page = state.post_service
        .list_by_club(&club_id, &user.0.id, ListPostsInput {
            page: params.page,
            page_size: params.page_size,
            sort,
            query: params.query,
            only_notice: params.only_notice.unwrap_or(false),
        })
        .await?;

    Ok(Json(page))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Post title is required".into()));
    }
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("Post content is required".into()));
    }

    let post = state.post_service
        .create_post(&club_id, &user.0.id, CreatePostInput {
            title: payload.title,
            content: payload.content,
            visibility: payload.visibility.as_str().to_string(),
            is_notice: payload.is_notice.unwrap_or(false),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Club-scoped detail route. Bumps the view counter; the membership check
/// runs against the club the post actually belongs to.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((_, post_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.post_service.get_post(&post_id, &user.0.id).await?;
    Ok(Json(detail))
}

/// Direct detail route used by cross-club views.
pub async fn get_post_direct(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.post_service.get_post(&post_id, &user.0.id).await?;
    Ok(Json(detail))
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, post_id)): Path<(String, String)>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.post_service
        .update_post(&post_id, &user.0.id, &club_id, PostPatch {
            title: payload.title,
            content: payload.content,
            visibility: payload.visibility.map(|v| v.as_str().to_string()),
            is_notice: payload.is_notice,
        })
        .await?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, post_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.post_service.delete_post(&post_id, &club_id, &user.0.id).await?;
    Ok(Json(serde_json::json!({"message": "Post deleted"})))
}
