use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_LEADER: &str = "LEADER";
pub const ROLE_WRITER: &str = "WRITER";
pub const ROLE_READER: &str = "READER";

pub const TIER_JUNIOR: &str = "JUNIOR";
pub const TIER_SENIOR: &str = "SENIOR";
pub const TIER_MANAGER: &str = "MANAGER";

/// Per-club role, validated at the request boundary.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClubRole {
    Leader,
    Writer,
    Reader,
}

impl ClubRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Leader => ROLE_LEADER,
            ClubRole::Writer => ROLE_WRITER,
            ClubRole::Reader => ROLE_READER,
        }
    }
}

/// Seniority tier, gating notice-pinning independently of role.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberTier {
    Junior,
    Senior,
    Manager,
}

impl MemberTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTier::Junior => TIER_JUNIOR,
            MemberTier::Senior => TIER_SENIOR,
            MemberTier::Manager => TIER_MANAGER,
        }
    }
}

/// Join record linking a user to a club. `approved = false` is a pending
/// join request; pending rows are READER/JUNIOR by construction.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub club_id: String,
    pub approved: bool,
    pub role: String,
    pub tier: String,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// A pending join request awaiting leader review.
    pub fn new_request(user_id: String, club_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            club_id,
            approved: false,
            role: ROLE_READER.to_string(),
            tier: TIER_JUNIOR.to_string(),
            created_at: Utc::now(),
        }
    }

    /// The founding membership created together with the club itself.
    pub fn new_leader(user_id: String, club_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            club_id,
            approved: true,
            role: ROLE_LEADER.to_string(),
            tier: TIER_MANAGER.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_leader(&self) -> bool {
        self.role == ROLE_LEADER
    }

    pub fn can_write(&self) -> bool {
        self.role == ROLE_LEADER || self.role == ROLE_WRITER
    }
}

/// Membership joined with the user's profile, for member listings and
/// join-request review. `joined_at` is the request time while pending.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct MemberView {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub tier: String,
    pub joined_at: DateTime<Utc>,
}
