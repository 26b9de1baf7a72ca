use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::UpdateMemberRequest;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_join_requests(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let requests = state.club_service
        .list_join_requests(&club_id, &user.0.id, &user.0.system_role)
        .await?;
    Ok(Json(requests))
}

pub async fn approve_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let membership = state.club_service
        .approve_member(&club_id, &member_id, &user.0.id, &user.0.system_role)
        .await?;
    Ok(Json(membership))
}

pub async fn reject_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.club_service
        .reject_member(&club_id, &member_id, &user.0.id, &user.0.system_role)
        .await?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let members = state.club_service.list_members(&club_id, &user.0.id).await?;
    Ok(Json(members))
}

pub async fn get_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let member = state.club_service
        .get_member_detail(&user.0.id, &club_id, &member_id)
        .await?;
    Ok(Json(member))
}

pub async fn update_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, member_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.club_service
        .update_member_role_tier(
            &user.0.id,
            &club_id,
            &member_id,
            payload.role.map(|r| r.as_str()),
            payload.tier.map(|t| t.as_str()),
        )
        .await?;
    Ok(Json(updated))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.club_service.remove_member(&user.0.id, &club_id, &member_id).await?;
    Ok(Json(serde_json::json!({"success": true})))
}
