use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateClubRequest;
use crate::api::dtos::responses::JoinRequestResponse;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_clubs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let clubs = state.club_service.list_all().await?;
    Ok(Json(clubs))
}

pub async fn list_my_clubs(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let clubs = state.club_service.list_my(&user.0.id).await?;
    Ok(Json(clubs))
}

pub async fn get_club(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let club = state.club_service.get_club(&club_id).await?;
    Ok(Json(club))
}

pub async fn create_club(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateClubRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Club name is required".into()));
    }
    if name.len() > 50 {
        return Err(AppError::Validation("Club name must be 50 characters or less".into()));
    }
    if payload.description.as_deref().is_some_and(|d| d.len() > 200) {
        return Err(AppError::Validation("Description must be 200 characters or less".into()));
    }

    let club = state.club_service
        .create_club(name, payload.description, &user.0.id)
        .await?;

    Ok((StatusCode::CREATED, Json(club)))
}

pub async fn request_join(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.club_service.request_join(&club_id, &user.0.id).await?;

    Ok((StatusCode::CREATED, Json(JoinRequestResponse {
        message: "Join request submitted".to_string(),
        request,
    })))
}
