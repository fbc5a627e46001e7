//! Invite service
//!
//! Handles invite creation, listing, deactivation, and redemption by code.

use channel_core::{generate_invite_code, Channel, ChannelMember, DomainError, EventType, Invite, MemberRole, Snowflake};
use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CreateInviteRequest, InviteResponse};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at drawing an unused code before giving up
const CODE_ATTEMPTS: usize = 5;

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    /// Create a new InviteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an invite with a fresh code
    #[instrument(skip(self, request))]
    pub async fn create_invite(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateInviteRequest,
    ) -> ServiceResult<InviteResponse> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        let channel = access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        if request.expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(ServiceError::validation("Invite expiry must be in the future"));
        }

        for _ in 0..CODE_ATTEMPTS {
            let code = generate_invite_code();
            if self.ctx.invite_repo().code_exists(&code).await? {
                continue;
            }

            let invite = Invite::new(self.ctx.generate_id(), channel_id, user_id, code)
                .with_max_uses(request.max_uses)
                .with_expires_at(request.expires_at);

            match self.ctx.invite_repo().create(&invite).await {
                Ok(()) => {}
                // Lost a race on the code; draw another
                Err(DomainError::InviteCodeExists) => continue,
                Err(e) => return Err(e.into()),
            }

            info!(channel_id = %channel_id, invite_id = %invite.id, "Invite created");

            self.ctx.emit(EventType::InviteCreated, channel_id, user_id, &invite).await;
            return Ok(InviteResponse {
                invite,
                channel_name: channel.name,
            });
        }

        warn!(channel_id = %channel_id, "Exhausted invite code attempts");
        Err(DomainError::InviteCodeExists.into())
    }

    /// List a channel's invites
    #[instrument(skip(self))]
    pub async fn list_invites(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Invite>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        Ok(self.ctx.invite_repo().list(channel_id).await?)
    }

    /// Deactivate an invite
    #[instrument(skip(self))]
    pub async fn delete_invite(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        invite_id: Snowflake,
    ) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let invite = self
            .ctx
            .invite_repo()
            .find_by_id(invite_id)
            .await?
            .ok_or(DomainError::InviteNotFound)?;
        ensure_in_channel(invite.channel_id, channel_id, || DomainError::InviteNotFound)?;

        self.ctx.invite_repo().deactivate(invite_id).await?;

        info!(channel_id = %channel_id, invite_id = %invite_id, "Invite deactivated");
        Ok(())
    }

    /// Redeem an invite code; returns the joined channel
    #[instrument(skip(self, code))]
    pub async fn join_by_code(&self, user_id: Snowflake, code: &str) -> ServiceResult<Channel> {
        let invite = self
            .ctx
            .invite_repo()
            .find_by_code(code.trim())
            .await?
            .ok_or(DomainError::InviteNotFound)?;

        let now = Utc::now();
        if !invite.is_active {
            return Err(DomainError::InviteInactive.into());
        }
        if invite.is_expired_at(now) {
            return Err(DomainError::InviteExpired.into());
        }
        if invite.is_exhausted() {
            return Err(DomainError::InviteMaxUses.into());
        }

        let channel_id = invite.channel_id;
        let access = ChannelAccess::new(self.ctx);
        let channel = access.channel(channel_id).await?;

        if self.ctx.moderation_repo().is_banned(channel_id, user_id, now).await? {
            return Err(DomainError::UserBanned.into());
        }
        if access.role(channel_id, user_id).await?.is_some() {
            return Err(DomainError::AlreadyMember.into());
        }

        let member = ChannelMember::new(self.ctx.generate_id(), channel_id, user_id, MemberRole::Member);
        self.ctx.invite_repo().redeem(invite.id, &member).await?;

        info!(channel_id = %channel_id, user_id = %user_id, invite_id = %invite.id, "Joined by invite");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx.emit(EventType::MemberJoined, channel_id, user_id, &member).await;
        Ok(channel)
    }

    /// Deactivate every expired invite; returns how many changed
    #[instrument(skip(self))]
    pub async fn deactivate_expired_invites(&self) -> ServiceResult<u64> {
        let count = self.ctx.invite_repo().deactivate_expired(Utc::now()).await?;
        if count > 0 {
            info!(count, "Expired invites deactivated");
        }
        Ok(count)
    }
}
