use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest};
use crate::domain::services::schedule_service::{CreateScheduleInput, SchedulePatch};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{DateTime, NaiveDate, Utc};

/// Accepts either an RFC 3339 timestamp or a plain date, which is taken as
/// midnight UTC.
fn parse_bound(raw: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
        .map_err(|_| AppError::Validation(format!("{} date format is invalid", field)))
}

pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
    Query(params): Query<ScheduleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let from = params.from.as_deref().map(|raw| parse_bound(raw, "from")).transpose()?;
    let to = params.to.as_deref().map(|raw| parse_bound(raw, "to")).transpose()?;

    if let Some(limit) = params.limit {
        if limit <= 0 {
            return Err(AppError::Validation("limit must be a positive number".into()));
        }
    }

    let schedules = state.schedule_service
        .list_by_club(&club_id, &user.0.id, from, to, params.limit)
        .await?;

    Ok(Json(serde_json::json!({ "schedules": schedules })))
}

pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(club_id): Path<String>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Schedule title is required".into()));
    }

    let schedule = state.schedule_service
        .create_schedule(&club_id, &user.0.id, CreateScheduleInput {
            title: payload.title,
            start_at: payload.start_at,
            end_at: payload.end_at,
            content: payload.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "schedule": schedule }))))
}

pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((_, schedule_id)): Path<(String, String)>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = state.schedule_service
        .update_schedule(&schedule_id, &user.0.id, SchedulePatch {
            title: payload.title,
            start_at: payload.start_at,
            end_at: payload.end_at,
            content: payload.content,
        })
        .await?;

    Ok(Json(serde_json::json!({ "schedule": schedule })))
}

pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((_, schedule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_service.delete_schedule(&schedule_id, &user.0.id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
