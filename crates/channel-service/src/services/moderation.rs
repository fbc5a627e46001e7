//! Moderation service
//!
//! Bans and mutes are independent of membership. Every action and its
//! reversal is written to the moderation log in the same transaction.

use channel_core::{
    Ban, DomainError, EventType, ModerationAction, ModerationEntry, Mute, Page, Restriction, Snowflake,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{MuteStatusResponse, RestrictMemberRequest};

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ban a user; a current membership is removed in the same write
    #[instrument(skip(self, request))]
    pub async fn ban_member(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_id: Snowflake,
        request: RestrictMemberRequest,
    ) -> ServiceResult<Ban> {
        let (ban, log) = self
            .prepare(channel_id, actor_id, user_id, ModerationAction::Ban, request)
            .await?;

        self.ctx.moderation_repo().ban(&ban, &log).await?;

        info!(channel_id = %channel_id, user_id = %user_id, banned_by = %actor_id, "Member banned");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx.emit(EventType::MemberBanned, channel_id, actor_id, &ban).await;
        Ok(ban)
    }

    /// Lift a ban
    #[instrument(skip(self))]
    pub async fn unban_member(&self, channel_id: Snowflake, actor_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        if self.ctx.moderation_repo().find_ban(channel_id, user_id).await?.is_none() {
            return Err(DomainError::BanNotFound.into());
        }

        let log = ModerationEntry::new(self.ctx.generate_id(), channel_id, user_id, ModerationAction::Unban, actor_id);
        self.ctx.moderation_repo().unban(channel_id, user_id, &log).await?;

        info!(channel_id = %channel_id, user_id = %user_id, unbanned_by = %actor_id, "Member unbanned");

        self.ctx
            .emit(EventType::MemberUnbanned, channel_id, actor_id, &json!({ "user_id": user_id }))
            .await;
        Ok(())
    }

    /// Mute a user
    #[instrument(skip(self, request))]
    pub async fn mute_member(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_id: Snowflake,
        request: RestrictMemberRequest,
    ) -> ServiceResult<Mute> {
        let (mute, log) = self
            .prepare(channel_id, actor_id, user_id, ModerationAction::Mute, request)
            .await?;

        self.ctx.moderation_repo().mute(&mute, &log).await?;

        info!(channel_id = %channel_id, user_id = %user_id, muted_by = %actor_id, "Member muted");

        self.ctx.emit(EventType::MemberMuted, channel_id, actor_id, &mute).await;
        Ok(mute)
    }

    /// Lift a mute
    #[instrument(skip(self))]
    pub async fn unmute_member(&self, channel_id: Snowflake, actor_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        if self.ctx.moderation_repo().find_mute(channel_id, user_id).await?.is_none() {
            return Err(DomainError::MuteNotFound.into());
        }

        let log = ModerationEntry::new(self.ctx.generate_id(), channel_id, user_id, ModerationAction::Unmute, actor_id);
        self.ctx.moderation_repo().unmute(channel_id, user_id, &log).await?;

        info!(channel_id = %channel_id, user_id = %user_id, unmuted_by = %actor_id, "Member unmuted");

        self.ctx
            .emit(EventType::MemberUnmuted, channel_id, actor_id, &json!({ "user_id": user_id }))
            .await;
        Ok(())
    }

    /// Bans on record, including expired ones
    #[instrument(skip(self))]
    pub async fn list_bans(&self, channel_id: Snowflake, actor_id: Snowflake) -> ServiceResult<Vec<Ban>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, actor_id).await?;
        Ok(self.ctx.moderation_repo().list_bans(channel_id).await?)
    }

    /// Mutes on record, including expired ones
    #[instrument(skip(self))]
    pub async fn list_mutes(&self, channel_id: Snowflake, actor_id: Snowflake) -> ServiceResult<Vec<Mute>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, actor_id).await?;
        Ok(self.ctx.moderation_repo().list_mutes(channel_id).await?)
    }

    /// Whether `user_id` is muted now; members may ask about themselves
    #[instrument(skip(self))]
    pub async fn mute_status(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MuteStatusResponse> {
        let access = ChannelAccess::new(self.ctx);
        if actor_id == user_id {
            access.require_member(channel_id, actor_id).await?;
        } else {
            access.require_moderator(channel_id, actor_id).await?;
        }

        let is_muted = self.ctx.moderation_repo().is_muted(channel_id, user_id, Utc::now()).await?;
        Ok(MuteStatusResponse { user_id, is_muted })
    }

    /// Moderation log, newest first
    #[instrument(skip(self))]
    pub async fn get_moderation_history(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<ModerationEntry>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, actor_id).await?;
        Ok(self.ctx.moderation_repo().history(channel_id, page).await?)
    }

    /// Shared checks and record construction for ban and mute
    async fn prepare(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_id: Snowflake,
        action: ModerationAction,
        request: RestrictMemberRequest,
    ) -> ServiceResult<(Restriction, ModerationEntry)> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        if access.role(channel_id, user_id).await?.is_some_and(|role| role.is_owner()) {
            return Err(DomainError::CannotModerateOwner.into());
        }
        if request.expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(ServiceError::validation("Expiry must be in the future"));
        }

        let restriction = Restriction::new(
            self.ctx.generate_id(),
            channel_id,
            user_id,
            actor_id,
            request.reason.clone(),
            request.expires_at,
        );
        let log = ModerationEntry::new(self.ctx.generate_id(), channel_id, user_id, action, actor_id)
            .with_details(request.reason, request.expires_at);

        Ok((restriction, log))
    }
}
