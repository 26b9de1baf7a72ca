use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://club-hub.local/claims/system_role")]
    pub system_role: String,

    #[serde(rename = "https://club-hub.local/claims/csrf")]
    pub csrf_token: String,
}

/// The identity pair the core trusts verbatim: resolved from the access
/// token and threaded explicitly into every service call.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub system_role: String,
}

#[derive(Debug, FromRow)]
pub struct RefreshTokenRecord {
    pub token_hash: String,
    pub user_id: String,
    pub family_id: String,
    pub generation_id: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub system_role: String,
}
