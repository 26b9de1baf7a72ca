use std::sync::Arc;
use crate::domain::models::club::{Club, ClubSummary};
use crate::domain::models::membership::{MemberView, Membership};
use crate::domain::ports::{ClubRepository, MembershipRepository};
use crate::domain::services::authz::Authorizer;
use crate::error::AppError;
use tracing::info;

pub struct ClubService {
    clubs: Arc<dyn ClubRepository>,
    memberships: Arc<dyn MembershipRepository>,
    authorizer: Arc<Authorizer>,
}

impl ClubService {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        memberships: Arc<dyn MembershipRepository>,
        authorizer: Arc<Authorizer>,
    ) -> Self {
        Self { clubs, memberships, authorizer }
    }

    /// Club plus founding LEADER/MANAGER membership, one transaction.
    /// Case-insensitive name collisions surface as Conflict via the unique
    /// index on the store.
    pub async fn create_club(
        &self,
        name: String,
        description: Option<String>,
        creator_user_id: &str,
    ) -> Result<Club, AppError> {
        let club = Club::new(name, description);
        let leader = Membership::new_leader(creator_user_id.to_string(), club.id.clone());

        let created = self.clubs.create_with_leader(&club, &leader).await?;
        info!("Club created: {} by user {}", created.id, creator_user_id);
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Club>, AppError> {
        self.clubs.list_all().await
    }

    pub async fn list_my(&self, user_id: &str) -> Result<Vec<ClubSummary>, AppError> {
        self.clubs.list_for_user(user_id).await
    }

    pub async fn get_club(&self, club_id: &str) -> Result<Club, AppError> {
        self.clubs.find_by_id(club_id).await?
            .ok_or(AppError::NotFound("Club not found".into()))
    }

    pub async fn request_join(&self, club_id: &str, user_id: &str) -> Result<Membership, AppError> {
        self.clubs.find_by_id(club_id).await?
            .ok_or(AppError::NotFound("Club not found".into()))?;

        if let Some(existing) = self.memberships.find_by_user_and_club(user_id, club_id).await? {
            if !existing.approved {
                return Err(AppError::Conflict("A join request for this club is already pending".into()));
            }
            return Err(AppError::Conflict("Already a member of this club".into()));
        }

        let request = Membership::new_request(user_id.to_string(), club_id.to_string());
        let created = self.memberships.create(&request).await?;

        info!("Join request created: user {} -> club {}", user_id, club_id);
        Ok(created)
    }

    /// Pending requests in FIFO review order (oldest first).
    pub async fn list_join_requests(
        &self,
        club_id: &str,
        requester_id: &str,
        requester_role: &str,
    ) -> Result<Vec<MemberView>, AppError> {
        self.authorizer.require_leader_or_admin(club_id, requester_id, requester_role).await?;
        self.memberships.list_pending(club_id).await
    }

    pub async fn approve_member(
        &self,
        club_id: &str,
        member_id: &str,
        requester_id: &str,
        requester_role: &str,
    ) -> Result<Membership, AppError> {
        self.authorizer.require_leader_or_admin(club_id, requester_id, requester_role).await?;

        let member = self.memberships.find_by_id(member_id).await?;
        match member {
            Some(m) if m.club_id == club_id => {}
            _ => return Err(AppError::NotFound("Member not found".into())),
        }

        // Approve-if-pending UPDATE: of two concurrent approvals exactly one
        // observes the pending row.
        let approved = self.memberships.approve_if_pending(member_id).await?
            .ok_or(AppError::Conflict("Member is already approved".into()))?;

        info!("Membership approved: {} in club {}", member_id, club_id);
        Ok(approved)
    }

    pub async fn reject_member(
        &self,
        club_id: &str,
        member_id: &str,
        requester_id: &str,
        requester_role: &str,
    ) -> Result<(), AppError> {
        self.authorizer.require_leader_or_admin(club_id, requester_id, requester_role).await?;

        let member = match self.memberships.find_by_id(member_id).await? {
            Some(m) if m.club_id == club_id => m,
            _ => return Err(AppError::NotFound("Member not found".into())),
        };

        if member.approved {
            return Err(AppError::Conflict("An approved member cannot be rejected".into()));
        }

        self.memberships.delete(member_id).await?;
        info!("Join request rejected: {} in club {}", member_id, club_id);
        Ok(())
    }

    /// Approved members only, leaders first, then join order.
    pub async fn list_members(&self, club_id: &str, requester_id: &str) -> Result<Vec<MemberView>, AppError> {
        self.authorizer.require_approved_member(requester_id, club_id).await?;
        self.memberships.list_approved(club_id).await
    }

    pub async fn get_member_detail(
        &self,
        requester_id: &str,
        club_id: &str,
        member_id: &str,
    ) -> Result<MemberView, AppError> {
        self.authorizer.require_approved_member(requester_id, club_id).await?;
        self.memberships.find_member_view(member_id, club_id).await?
            .ok_or(AppError::NotFound("Member not found".into()))
    }

    /// Partial patch: omitted fields keep their current value. The founding
    /// leader is exempt from role changes, ADMIN included.
    pub async fn update_member_role_tier(
        &self,
        requester_id: &str,
        club_id: &str,
        member_id: &str,
        role: Option<&str>,
        tier: Option<&str>,
    ) -> Result<MemberView, AppError> {
        self.authorizer.require_leader(requester_id, club_id).await?;

        let member = match self.memberships.find_by_id(member_id).await? {
            Some(m) if m.club_id == club_id && m.approved => m,
            _ => return Err(AppError::NotFound("Member not found".into())),
        };

        if member.is_leader() {
            return Err(AppError::Forbidden("The club leader's role cannot be changed".into()));
        }

        let new_role = role.unwrap_or(&member.role);
        let new_tier = tier.unwrap_or(&member.tier);
        self.memberships.update_role_tier(member_id, new_role, new_tier).await?;

        info!("Member {} updated in club {}: role={} tier={}", member_id, club_id, new_role, new_tier);

        self.memberships.find_member_view(member_id, club_id).await?
            .ok_or(AppError::NotFound("Member not found".into()))
    }

    pub async fn remove_member(
        &self,
        requester_id: &str,
        club_id: &str,
        member_id: &str,
    ) -> Result<(), AppError> {
        self.authorizer.require_leader(requester_id, club_id).await?;

        let member = match self.memberships.find_by_id(member_id).await? {
            Some(m) if m.club_id == club_id => m,
            _ => return Err(AppError::NotFound("Member not found".into())),
        };

        if member.is_leader() {
            return Err(AppError::Forbidden("The club leader cannot be removed".into()));
        }

        self.memberships.delete(member_id).await?;
        info!("Member {} removed from club {}", member_id, club_id);
        Ok(())
    }
}
