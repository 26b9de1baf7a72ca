use crate::domain::{
    models::{club::{Club, ClubSummary}, membership::Membership},
    ports::ClubRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteClubRepo {
    pool: SqlitePool,
}

impl SqliteClubRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubRepository for SqliteClubRepo {
    async fn create_with_leader(&self, club: &Club, leader: &Membership) -> Result<Club, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Club>(
            "INSERT INTO clubs (id, name, description, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
            .bind(&club.id)
            .bind(&club.name)
            .bind(&club.description)
            .bind(club.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO club_members (id, user_id, club_id, approved, role, tier, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
            .bind(&leader.id)
            .bind(&leader.user_id)
            .bind(&leader.club_id)
            .bind(leader.approved)
            .bind(&leader.role)
            .bind(&leader.tier)
            .bind(leader.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ClubSummary>, AppError> {
        sqlx::query_as::<_, ClubSummary>(
            "SELECT c.id, c.name, c.description, m.role, m.tier
             FROM club_members m
             JOIN clubs c ON c.id = m.club_id
             WHERE m.user_id = ? AND m.approved = 1
             ORDER BY c.name ASC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
