use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A club event. Owned by the club as a whole; no author is tracked.
/// Invariant: `end_at >= start_at`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Schedule {
    pub id: String,
    pub club_id: String,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(
        club_id: String,
        title: String,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        content: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            club_id,
            title,
            start_at,
            end_at,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
