use crate::domain::{
    models::membership::{MemberView, Membership},
    ports::MembershipRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMembershipRepo {
    pool: SqlitePool,
}

impl SqliteMembershipRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for SqliteMembershipRepo {
    async fn create(&self, membership: &Membership) -> Result<Membership, AppError> {
        sqlx::query_as::<_, Membership>(
            "INSERT INTO club_members (id, user_id, club_id, approved, role, tier, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&membership.id)
            .bind(&membership.user_id)
            .bind(&membership.club_id)
            .bind(membership.approved)
            .bind(&membership.role)
            .bind(&membership.tier)
            .bind(membership.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Membership>, AppError> {
        sqlx::query_as::<_, Membership>("SELECT * FROM club_members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_club(&self, user_id: &str, club_id: &str) -> Result<Option<Membership>, AppError> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM club_members WHERE user_id = ? AND club_id = ?",
        )
            .bind(user_id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_pending(&self, club_id: &str) -> Result<Vec<MemberView>, AppError> {
        sqlx::query_as::<_, MemberView>(
            "SELECT m.id, m.user_id, u.name, u.email, m.role, m.tier, m.created_at AS joined_at
             FROM club_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.club_id = ? AND m.approved = 0
             ORDER BY m.created_at ASC",
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_approved(&self, club_id: &str) -> Result<Vec<MemberView>, AppError> {
        sqlx::query_as::<_, MemberView>(
            "SELECT m.id, m.user_id, u.name, u.email, m.role, m.tier, m.created_at AS joined_at
             FROM club_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.club_id = ? AND m.approved = 1
             ORDER BY CASE m.role WHEN 'LEADER' THEN 0 WHEN 'WRITER' THEN 1 ELSE 2 END, m.created_at ASC",
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_member_view(&self, id: &str, club_id: &str) -> Result<Option<MemberView>, AppError> {
        sqlx::query_as::<_, MemberView>(
            "SELECT m.id, m.user_id, u.name, u.email, m.role, m.tier, m.created_at AS joined_at
             FROM club_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.id = ? AND m.club_id = ? AND m.approved = 1",
        )
            .bind(id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn approve_if_pending(&self, id: &str) -> Result<Option<Membership>, AppError> {
        sqlx::query_as::<_, Membership>(
            "UPDATE club_members SET approved = 1 WHERE id = ? AND approved = 0 RETURNING *",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_role_tier(&self, id: &str, role: &str, tier: &str) -> Result<Membership, AppError> {
        sqlx::query_as::<_, Membership>(
            "UPDATE club_members SET role = ?, tier = ? WHERE id = ? RETURNING *",
        )
            .bind(role)
            .bind(tier)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM club_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".into()));
        }
        Ok(())
    }
}
