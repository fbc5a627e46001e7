//! Channel tab service

use std::collections::HashSet;

use channel_core::{ChannelTab, DomainError, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateTabRequest, ReorderTabsRequest, UpdateTabRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel tab service
pub struct TabService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TabService<'a> {
    /// Create a new TabService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a tab
    #[instrument(skip(self, request))]
    pub async fn add_tab(&self, channel_id: Snowflake, user_id: Snowflake, request: CreateTabRequest) -> ServiceResult<ChannelTab> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let position = self.ctx.tab_repo().next_position(channel_id).await?;
        let mut tab = ChannelTab::new(
            self.ctx.generate_id(),
            channel_id,
            request.name,
            request.tab_type,
            position,
            user_id,
        );
        tab.config = request.config;

        self.ctx.tab_repo().create(&tab).await?;

        info!(channel_id = %channel_id, tab_id = %tab.id, position, "Tab added");
        Ok(tab)
    }

    /// Tabs by position
    #[instrument(skip(self))]
    pub async fn list_tabs(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<ChannelTab>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.tab_repo().list(channel_id).await?)
    }

    /// Rename or reconfigure a tab
    #[instrument(skip(self, request))]
    pub async fn update_tab(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        tab_id: Snowflake,
        request: UpdateTabRequest,
    ) -> ServiceResult<ChannelTab> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut tab = self.load(channel_id, tab_id).await?;
        if let Some(name) = request.name {
            tab.name = name;
        }
        if request.config.is_some() {
            tab.config = request.config;
        }
        tab.updated_at = Utc::now();

        self.ctx.tab_repo().update(&tab).await?;
        Ok(tab)
    }

    /// Remove a tab
    #[instrument(skip(self))]
    pub async fn remove_tab(&self, channel_id: Snowflake, user_id: Snowflake, tab_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        self.load(channel_id, tab_id).await?;
        self.ctx.tab_repo().delete(tab_id).await?;

        info!(channel_id = %channel_id, tab_id = %tab_id, "Tab removed");
        Ok(())
    }

    /// Assign positions 0..n in the given order
    #[instrument(skip(self, request))]
    pub async fn reorder_tabs(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: ReorderTabsRequest,
    ) -> ServiceResult<Vec<ChannelTab>> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut seen = HashSet::new();
        if !request.tab_ids.iter().all(|id| seen.insert(*id)) {
            return Err(ServiceError::validation("Tab ids must be unique"));
        }

        self.ctx.tab_repo().reorder(channel_id, &request.tab_ids).await?;

        info!(channel_id = %channel_id, count = request.tab_ids.len(), "Tabs reordered");
        Ok(self.ctx.tab_repo().list(channel_id).await?)
    }

    async fn load(&self, channel_id: Snowflake, tab_id: Snowflake) -> ServiceResult<ChannelTab> {
        let tab = self.ctx.tab_repo().find(tab_id).await?.ok_or(DomainError::TabNotFound)?;
        ensure_in_channel(tab.channel_id, channel_id, || DomainError::TabNotFound)?;
        Ok(tab)
    }
}
