//! Permission override service
//!
//! Overrides are keyed on (channel, permission type, target type, target id)
//! and only visible to owners and admins.

use channel_core::{DomainError, PermissionOverride, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::SetPermissionRequest;

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission override service
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Insert or replace an override
    #[instrument(skip(self, request))]
    pub async fn set_permission(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: SetPermissionRequest,
    ) -> ServiceResult<PermissionOverride> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        if request.allow && request.deny {
            return Err(ServiceError::validation("A permission cannot be both allowed and denied"));
        }

        let permission = PermissionOverride::new(
            self.ctx.generate_id(),
            channel_id,
            request.permission_type,
            request.target_type,
            request.target_id,
        )
        .with_flags(request.allow, request.deny);

        let stored = self.ctx.permission_repo().upsert(&permission).await?;

        info!(
            channel_id = %channel_id,
            permission = %stored.permission_type,
            target_type = stored.target_type.as_str(),
            "Permission override set"
        );
        Ok(stored)
    }

    /// List a channel's overrides
    #[instrument(skip(self))]
    pub async fn list_permissions(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<PermissionOverride>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        Ok(self.ctx.permission_repo().list(channel_id).await?)
    }

    /// Remove an override
    #[instrument(skip(self))]
    pub async fn delete_permission(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        permission_id: Snowflake,
    ) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let permission = self
            .ctx
            .permission_repo()
            .find(permission_id)
            .await?
            .ok_or(DomainError::PermissionNotFound)?;
        ensure_in_channel(permission.channel_id, channel_id, || DomainError::PermissionNotFound)?;

        self.ctx.permission_repo().delete(permission_id).await?;

        info!(channel_id = %channel_id, permission_id = %permission_id, "Permission override deleted");
        Ok(())
    }
}
