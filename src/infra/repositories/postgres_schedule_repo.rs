use crate::domain::{models::schedule::Schedule, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepo {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(
            "INSERT INTO schedules (id, club_id, title, start_at, end_at, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
            .bind(&schedule.id)
            .bind(&schedule.club_id)
            .bind(&schedule.title)
            .bind(schedule.start_at)
            .bind(schedule.end_at)
            .bind(&schedule.content)
            .bind(schedule.created_at)
            .bind(schedule.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_club(
        &self,
        club_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> Result<Vec<Schedule>, AppError> {
        let mut sql = String::from("SELECT * FROM schedules WHERE club_id = $1");
        let mut next_param = 2;
        if from.is_some() {
            sql.push_str(&format!(" AND end_at >= ${}", next_param));
            next_param += 1;
        }
        if to.is_some() {
            sql.push_str(&format!(" AND start_at <= ${}", next_param));
            next_param += 1;
        }
        sql.push_str(" ORDER BY start_at ASC");
        if limit.is_some() {
            sql.push_str(&format!(" LIMIT ${}", next_param));
        }

        let mut query = sqlx::query_as::<_, Schedule>(&sql).bind(club_id);
        if let Some(from) = from {
            query = query.bind(from);
        }
        if let Some(to) = to {
            query = query.bind(to);
        }
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, schedule: &Schedule) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(
            "UPDATE schedules SET title = $1, start_at = $2, end_at = $3, content = $4, updated_at = $5
             WHERE id = $6 RETURNING *",
        )
            .bind(&schedule.title)
            .bind(schedule.start_at)
            .bind(schedule.end_at)
            .bind(&schedule.content)
            .bind(schedule.updated_at)
            .bind(&schedule.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Schedule not found".into()));
        }
        Ok(())
    }
}
