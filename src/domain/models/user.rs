use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const SYSTEM_ROLE_USER: &str = "USER";
pub const SYSTEM_ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub system_role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            name,
            system_role: SYSTEM_ROLE_USER.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_system_admin(&self) -> bool {
        self.system_role == SYSTEM_ROLE_ADMIN
    }
}
