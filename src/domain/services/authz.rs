use std::sync::Arc;
use crate::domain::models::membership::{Membership, ROLE_LEADER, TIER_MANAGER, TIER_SENIOR};
use crate::domain::models::user::SYSTEM_ROLE_ADMIN;
use crate::domain::ports::MembershipRepository;
use crate::error::AppError;

/// Notice-pinning is open to leaders regardless of tier, and to SENIOR or
/// MANAGER members regardless of role.
pub fn can_set_notice(role: &str, tier: &str) -> bool {
    role == ROLE_LEADER || tier == TIER_SENIOR || tier == TIER_MANAGER
}

/// Stateless authorization gates over the membership store. Every decision
/// is a pure function of stored state; the deny path is always a typed
/// `Forbidden`, never a generic failure.
pub struct Authorizer {
    memberships: Arc<dyn MembershipRepository>,
}

impl Authorizer {
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// Baseline gate for any club-scoped read. A system ADMIN without an
    /// approved membership is still denied here.
    pub async fn require_approved_member(&self, user_id: &str, club_id: &str) -> Result<Membership, AppError> {
        match self.memberships.find_by_user_and_club(user_id, club_id).await? {
            Some(m) if m.approved => Ok(m),
            _ => Err(AppError::Forbidden("Only approved club members can access this resource".into())),
        }
    }

    /// Governs join-request review. A system ADMIN passes without holding a
    /// membership at all.
    pub async fn require_leader_or_admin(&self, club_id: &str, user_id: &str, system_role: &str) -> Result<(), AppError> {
        if system_role == SYSTEM_ROLE_ADMIN {
            return Ok(());
        }

        match self.memberships.find_by_user_and_club(user_id, club_id).await? {
            Some(m) if m.approved && m.is_leader() => Ok(()),
            _ => Err(AppError::Forbidden("Only the club leader can manage join requests".into())),
        }
    }

    /// Governs schedule mutations.
    pub async fn require_writer_or_leader(&self, user_id: &str, club_id: &str) -> Result<Membership, AppError> {
        let membership = self.require_approved_member(user_id, club_id).await?;
        if !membership.can_write() {
            return Err(AppError::Forbidden("Only a WRITER or the club leader can manage schedules".into()));
        }
        Ok(membership)
    }

    /// Governs member role/tier administration. Deliberately club-local:
    /// the system ADMIN does not bypass this gate.
    pub async fn require_leader(&self, user_id: &str, club_id: &str) -> Result<Membership, AppError> {
        let membership = self.require_approved_member(user_id, club_id).await?;
        if !membership.is_leader() {
            return Err(AppError::Forbidden("Only the club leader can manage members".into()));
        }
        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::membership::{ROLE_READER, ROLE_WRITER, TIER_JUNIOR};

    #[test]
    fn test_notice_permission_matrix() {
        assert!(can_set_notice(ROLE_LEADER, TIER_JUNIOR), "leaders pin regardless of tier");
        assert!(can_set_notice(ROLE_READER, TIER_SENIOR), "seniors pin regardless of role");
        assert!(can_set_notice(ROLE_WRITER, TIER_MANAGER));
        assert!(!can_set_notice(ROLE_READER, TIER_JUNIOR), "junior readers cannot pin");
        assert!(!can_set_notice(ROLE_WRITER, TIER_JUNIOR), "writer role alone is not enough");
    }
}
