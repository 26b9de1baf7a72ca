use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Club {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            created_at: Utc::now(),
        }
    }
}

/// A club as seen from one member's perspective: the club row plus the
/// caller's own role and tier in it. Backs the "my clubs" listing.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct ClubSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub role: String,
    pub tier: String,
}
