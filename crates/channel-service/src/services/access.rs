//! Channel access ladder
//!
//! Three tiers gate every channel-scoped operation: owner, owner-or-admin,
//! and member. Tier checks run before any sub-entity lookup.

use channel_core::{Channel, ChannelMember, DomainError, MemberRole, Snowflake};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Role checks against channel membership
pub struct ChannelAccess<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelAccess<'a> {
    /// Create a new ChannelAccess
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a live channel or fail with `ChannelNotFound`
    pub async fn channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| DomainError::ChannelNotFound(channel_id).into())
    }

    /// The user's role, `None` for non-members
    pub async fn role(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Option<MemberRole>> {
        Ok(self
            .ctx
            .member_repo()
            .find(channel_id, user_id)
            .await?
            .map(|member| member.role))
    }

    /// Member tier
    #[instrument(skip(self))]
    pub async fn require_member(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelMember> {
        self.ctx
            .member_repo()
            .find(channel_id, user_id)
            .await?
            .ok_or_else(|| DomainError::NotMember.into())
    }

    /// Owner-or-admin tier
    #[instrument(skip(self))]
    pub async fn require_moderator(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<MemberRole> {
        match self.role(channel_id, user_id).await? {
            Some(role) if role.is_moderator() => Ok(role),
            _ => Err(DomainError::NotAuthorized.into()),
        }
    }

    /// Owner tier
    #[instrument(skip(self))]
    pub async fn require_owner(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        match self.role(channel_id, user_id).await? {
            Some(MemberRole::Owner) => Ok(()),
            _ => Err(DomainError::NotAuthorized.into()),
        }
    }

    /// The author of a sub-entity, or an owner/admin of its channel
    pub async fn require_author_or_moderator(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<()> {
        if author_id == user_id {
            return Ok(());
        }
        self.require_moderator(channel_id, user_id).await.map(|_| ())
    }
}

/// Sub-entities reached through the wrong channel are reported as missing
pub(crate) fn ensure_in_channel(
    entity_channel: Snowflake,
    path_channel: Snowflake,
    missing: impl FnOnce() -> DomainError,
) -> ServiceResult<()> {
    if entity_channel == path_channel {
        Ok(())
    } else {
        Err(missing().into())
    }
}
