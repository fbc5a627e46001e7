//! Channel link service

use channel_core::{ChannelLink, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::CreateLinkRequest;

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel link service
pub struct LinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LinkService<'a> {
    /// Create a new LinkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Link this channel to another
    #[instrument(skip(self, request), fields(target = %request.target_channel_id))]
    pub async fn create_link(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateLinkRequest,
    ) -> ServiceResult<ChannelLink> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        if request.target_channel_id == channel_id {
            return Err(ServiceError::validation("A channel cannot link to itself"));
        }
        access.channel(request.target_channel_id).await?;

        let link = ChannelLink::new(
            self.ctx.generate_id(),
            channel_id,
            request.target_channel_id,
            request.link_type,
            user_id,
        );
        self.ctx.link_repo().create(&link).await?;

        info!(link_id = %link.id, link_type = link.link_type.as_str(), "Channel link created");
        Ok(link)
    }

    /// Active links on either side of this channel
    #[instrument(skip(self))]
    pub async fn list_links(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<ChannelLink>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.link_repo().list_active(channel_id).await?)
    }

    /// Get a link touching this channel
    #[instrument(skip(self))]
    pub async fn get_link(&self, channel_id: Snowflake, user_id: Snowflake, link_id: Snowflake) -> ServiceResult<ChannelLink> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.load(channel_id, link_id).await
    }

    /// Deactivate a link from its source channel
    #[instrument(skip(self))]
    pub async fn delete_link(&self, channel_id: Snowflake, user_id: Snowflake, link_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        let link = self.load(channel_id, link_id).await?;
        if link.source_channel_id != channel_id {
            return Err(DomainError::NotAuthorized.into());
        }
        self.ctx.link_repo().deactivate(link_id).await?;

        info!(link_id = %link_id, "Channel link deactivated");
        Ok(())
    }

    async fn load(&self, channel_id: Snowflake, link_id: Snowflake) -> ServiceResult<ChannelLink> {
        let link = self.ctx.link_repo().find(link_id).await?.ok_or(DomainError::LinkNotFound)?;
        if !link.is_active || !link.involves(channel_id) {
            return Err(DomainError::LinkNotFound.into());
        }
        Ok(link)
    }
}
