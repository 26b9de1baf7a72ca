use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::domain::models::schedule::Schedule;
use crate::domain::ports::ScheduleRepository;
use crate::domain::services::authz::Authorizer;
use crate::error::AppError;
use tracing::info;

pub struct CreateScheduleInput {
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub content: Option<String>,
}

/// Partial patch. `content` is doubly optional: `None` leaves it unchanged,
/// `Some(None)` clears it.
#[derive(Default)]
pub struct SchedulePatch {
    pub title: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub content: Option<Option<String>>,
}

pub struct ScheduleService {
    schedules: Arc<dyn ScheduleRepository>,
    authorizer: Arc<Authorizer>,
}

impl ScheduleService {
    pub fn new(schedules: Arc<dyn ScheduleRepository>, authorizer: Arc<Authorizer>) -> Self {
        Self { schedules, authorizer }
    }

    /// Interval-overlap listing: a schedule is included when
    /// `[start_at, end_at]` intersects `[from, to]`, so a multi-day event
    /// that starts before `from` but ends inside the window still shows up.
    pub async fn list_by_club(
        &self,
        club_id: &str,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> Result<Vec<Schedule>, AppError> {
        self.authorizer.require_approved_member(user_id, club_id).await?;
        self.schedules.list_by_club(club_id, from, to, limit).await
    }

    pub async fn create_schedule(
        &self,
        club_id: &str,
        user_id: &str,
        input: CreateScheduleInput,
    ) -> Result<Schedule, AppError> {
        self.authorizer.require_writer_or_leader(user_id, club_id).await?;

        if input.end_at < input.start_at {
            return Err(AppError::Validation("end_at must not be before start_at".into()));
        }

        let schedule = Schedule::new(
            club_id.to_string(),
            input.title,
            input.start_at,
            input.end_at,
            input.content,
        );
        let created = self.schedules.create(&schedule).await?;

        info!("Schedule created: {} in club {}", created.id, club_id);
        Ok(created)
    }

    /// Authorization is scoped to the schedule's own club, not a
    /// caller-supplied id, so mismatched ids cannot reach another club's
    /// rows. The range invariant is re-checked only when the patch carries
    /// both endpoints.
    pub async fn update_schedule(
        &self,
        schedule_id: &str,
        user_id: &str,
        patch: SchedulePatch,
    ) -> Result<Schedule, AppError> {
        let mut schedule = self.schedules.find_by_id(schedule_id).await?
            .ok_or(AppError::NotFound("Schedule not found".into()))?;

        self.authorizer.require_writer_or_leader(user_id, &schedule.club_id).await?;

        if let (Some(start), Some(end)) = (patch.start_at, patch.end_at) {
            if end < start {
                return Err(AppError::Validation("end_at must not be before start_at".into()));
            }
        }

        if let Some(title) = patch.title {
            schedule.title = title;
        }
        if let Some(start) = patch.start_at {
            schedule.start_at = start;
        }
        if let Some(end) = patch.end_at {
            schedule.end_at = end;
        }
        if let Some(content) = patch.content {
            schedule.content = content;
        }
        schedule.updated_at = Utc::now();

        let updated = self.schedules.update(&schedule).await?;
        info!("Schedule updated: {}", schedule_id);
        Ok(updated)
    }

    pub async fn delete_schedule(&self, schedule_id: &str, user_id: &str) -> Result<(), AppError> {
        let schedule = self.schedules.find_by_id(schedule_id).await?
            .ok_or(AppError::NotFound("Schedule not found".into()))?;

        self.authorizer.require_writer_or_leader(user_id, &schedule.club_id).await?;

        self.schedules.delete(schedule_id).await?;
        info!("Schedule deleted: {}", schedule_id);
        Ok(())
    }
}
