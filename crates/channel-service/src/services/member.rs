//! Member service
//!
//! Handles channel membership: add, remove, leave, role changes, bulk operations.

use channel_core::{
    ChannelMember, DomainError, EventType, MemberRole, NotificationLevel, Snowflake,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{AddMemberRequest, BulkActionResult, BulkMembersRequest, BulkRoleRequest};

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a user to a channel
    #[instrument(skip(self, request), fields(target_id = %request.user_id))]
    pub async fn add_member(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        request: AddMemberRequest,
    ) -> ServiceResult<ChannelMember> {
        let access = ChannelAccess::new(self.ctx);
        let channel = access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        if !channel.accepts_new_members() {
            return Err(DomainError::ChannelArchived.into());
        }
        if self
            .ctx
            .moderation_repo()
            .is_banned(channel_id, request.user_id, Utc::now())
            .await?
        {
            return Err(DomainError::UserBanned.into());
        }
        if access.role(channel_id, request.user_id).await?.is_some() {
            return Err(DomainError::AlreadyMember.into());
        }

        let role = request.role.unwrap_or_default();
        if role.is_owner() {
            return Err(ServiceError::validation("Ownership can only be transferred"));
        }

        let member = ChannelMember::new(self.ctx.generate_id(), channel_id, request.user_id, role);
        self.ctx.member_repo().create(&member).await?;

        info!(channel_id = %channel_id, user_id = %request.user_id, role = role.as_str(), "Member added");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx.emit(EventType::MemberJoined, channel_id, actor_id, &member).await;
        Ok(member)
    }

    /// Remove another user from a channel
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        match access.role(channel_id, user_id).await? {
            None => return Err(DomainError::MemberNotFound.into()),
            Some(role) if role.is_owner() => return Err(DomainError::CannotRemoveOwner.into()),
            Some(_) => {}
        }

        self.ctx.member_repo().delete(channel_id, user_id).await?;

        info!(channel_id = %channel_id, user_id = %user_id, removed_by = %actor_id, "Member removed");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(EventType::MemberRemoved, channel_id, actor_id, &json!({ "user_id": user_id }))
            .await;
        Ok(())
    }

    /// Leave a channel; owners must transfer ownership first
    #[instrument(skip(self))]
    pub async fn leave_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        let member = access.require_member(channel_id, user_id).await?;

        if member.is_owner() {
            return Err(DomainError::CannotLeaveOwner.into());
        }

        self.ctx.member_repo().delete(channel_id, user_id).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Member left");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(EventType::MemberLeft, channel_id, user_id, &json!({ "user_id": user_id }))
            .await;
        Ok(())
    }

    /// Get a single membership
    #[instrument(skip(self))]
    pub async fn get_member(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelMember> {
        ChannelAccess::new(self.ctx).channel(channel_id).await?;
        self.ctx
            .member_repo()
            .find(channel_id, user_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound.into())
    }

    /// List members ordered by join time
    #[instrument(skip(self))]
    pub async fn list_members(&self, channel_id: Snowflake) -> ServiceResult<Vec<ChannelMember>> {
        ChannelAccess::new(self.ctx).channel(channel_id).await?;
        Ok(self.ctx.member_repo().list(channel_id).await?)
    }

    /// Change a member's role between admin and member
    #[instrument(skip(self))]
    pub async fn update_member_role(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_id: Snowflake,
        role: MemberRole,
    ) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_owner(channel_id, actor_id).await?;

        if role.is_owner() {
            return Err(ServiceError::validation("Ownership can only be transferred"));
        }
        match access.role(channel_id, user_id).await? {
            None => return Err(DomainError::MemberNotFound.into()),
            Some(current) if current.is_owner() => return Err(DomainError::CannotModerateOwner.into()),
            Some(_) => {}
        }

        self.ctx.member_repo().update_role(channel_id, user_id, role).await?;

        info!(channel_id = %channel_id, user_id = %user_id, role = role.as_str(), "Member role updated");

        self.ctx
            .emit(
                EventType::MemberRoleUpdated,
                channel_id,
                actor_id,
                &json!({ "user_id": user_id, "role": role }),
            )
            .await;
        Ok(())
    }

    /// Set the caller's notification level
    #[instrument(skip(self))]
    pub async fn update_notifications(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        level: NotificationLevel,
    ) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.ctx
            .member_repo()
            .update_notifications(channel_id, user_id, level)
            .await?;
        Ok(())
    }

    /// Stamp the caller's last-read time
    #[instrument(skip(self))]
    pub async fn update_last_read(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.ctx
            .member_repo()
            .update_last_read(channel_id, user_id, Utc::now())
            .await?;
        Ok(())
    }

    /// Add many users at once; banned users and existing members are skipped
    #[instrument(skip(self, request), fields(count = request.user_ids.len()))]
    pub async fn bulk_add_members(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        request: BulkMembersRequest,
    ) -> ServiceResult<u64> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        let channel = access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        if !channel.accepts_new_members() {
            return Err(DomainError::ChannelArchived.into());
        }

        let role = match request.role.unwrap_or_default() {
            MemberRole::Owner => MemberRole::Member,
            role => role,
        };

        let now = Utc::now();
        let mut members = Vec::with_capacity(request.user_ids.len());
        for user_id in dedup(request.user_ids) {
            if self.ctx.moderation_repo().is_banned(channel_id, user_id, now).await? {
                continue;
            }
            if access.role(channel_id, user_id).await?.is_some() {
                continue;
            }
            members.push(ChannelMember::new(self.ctx.generate_id(), channel_id, user_id, role));
        }

        let user_ids = if members.is_empty() {
            Vec::new()
        } else {
            self.ctx.member_repo().create_many(&members).await?
        };
        let added = user_ids.len() as u64;

        info!(channel_id = %channel_id, added, "Members bulk added");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(
                EventType::MembersBulkAdded,
                channel_id,
                actor_id,
                &json!({ "user_ids": user_ids, "role": role }),
            )
            .await;
        Ok(added)
    }

    /// Remove many users at once; the caller and the owner are never removed
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    pub async fn bulk_delete_members(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        user_ids: Vec<Snowflake>,
    ) -> ServiceResult<BulkActionResult> {
        if user_ids.is_empty() || user_ids.len() > 100 {
            return Err(ServiceError::validation("Provide 1-100 user ids"));
        }

        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, actor_id).await?;

        let mut result = BulkActionResult::default();
        let mut removed = Vec::new();
        for user_id in dedup(user_ids) {
            if user_id == actor_id {
                result.fail(user_id, "cannot remove yourself");
                continue;
            }
            match access.role(channel_id, user_id).await? {
                None => result.fail(user_id, DomainError::MemberNotFound),
                Some(role) if role.is_owner() => result.fail(user_id, DomainError::CannotRemoveOwner),
                Some(_) => match self.ctx.member_repo().delete(channel_id, user_id).await {
                    Ok(()) => {
                        result.succeed();
                        removed.push(user_id);
                    }
                    Err(e) => result.fail(user_id, e),
                },
            }
        }

        info!(channel_id = %channel_id, successful = result.successful, failed = result.failed, "Members bulk removed");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(EventType::MembersBulkRemoved, channel_id, actor_id, &json!({ "user_ids": removed }))
            .await;
        Ok(result)
    }

    /// Set one role on many members
    #[instrument(skip(self, request), fields(count = request.user_ids.len()))]
    pub async fn bulk_update_roles(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
        request: BulkRoleRequest,
    ) -> ServiceResult<BulkActionResult> {
        request.validate()?;
        if request.role.is_owner() {
            return Err(ServiceError::validation("Role must be admin or member"));
        }

        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_owner(channel_id, actor_id).await?;

        let mut result = BulkActionResult::default();
        let mut updated = Vec::new();
        for user_id in dedup(request.user_ids) {
            if user_id == actor_id {
                result.fail(user_id, "cannot change your own role");
                continue;
            }
            match access.role(channel_id, user_id).await? {
                None => result.fail(user_id, DomainError::MemberNotFound),
                Some(role) if role.is_owner() => result.fail(user_id, DomainError::CannotModerateOwner),
                Some(_) => match self.ctx.member_repo().update_role(channel_id, user_id, request.role).await {
                    Ok(()) => {
                        result.succeed();
                        updated.push(user_id);
                    }
                    Err(e) => result.fail(user_id, e),
                },
            }
        }

        info!(channel_id = %channel_id, role = request.role.as_str(), successful = result.successful, "Member roles bulk updated");

        self.ctx
            .emit(
                EventType::MembersBulkRoleUpdated,
                channel_id,
                actor_id,
                &json!({ "user_ids": updated, "role": request.role }),
            )
            .await;
        Ok(result)
    }
}

/// Drop repeated ids, keeping first-seen order
fn dedup(ids: Vec<Snowflake>) -> Vec<Snowflake> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
