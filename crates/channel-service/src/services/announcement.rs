//! Announcement service

use channel_core::{Announcement, DomainError, EventType, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateAnnouncementRequest, UpdateAnnouncementRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Announcement service
pub struct AnnouncementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnnouncementService<'a> {
    /// Create a new AnnouncementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post an announcement
    #[instrument(skip(self, request))]
    pub async fn create_announcement(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateAnnouncementRequest,
    ) -> ServiceResult<Announcement> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut announcement = Announcement::new(
            self.ctx.generate_id(),
            channel_id,
            request.title,
            request.content,
            request.priority,
            user_id,
        );
        announcement.expires_at = request.expires_at;

        self.ctx.announcement_repo().create(&announcement).await?;

        info!(
            channel_id = %channel_id,
            announcement_id = %announcement.id,
            priority = announcement.priority.as_str(),
            "Announcement created"
        );

        self.ctx
            .emit(EventType::AnnouncementCreated, channel_id, user_id, &announcement)
            .await;
        Ok(announcement)
    }

    /// Pinned first, then newest first
    #[instrument(skip(self))]
    pub async fn list_announcements(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Announcement>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.announcement_repo().list(channel_id).await?)
    }

    /// Edit an announcement
    #[instrument(skip(self, request))]
    pub async fn update_announcement(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        announcement_id: Snowflake,
        request: UpdateAnnouncementRequest,
    ) -> ServiceResult<Announcement> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut announcement = self.load(channel_id, announcement_id).await?;
        if let Some(title) = request.title {
            announcement.title = title;
        }
        if let Some(content) = request.content {
            announcement.content = content;
        }
        if let Some(priority) = request.priority {
            announcement.priority = priority;
        }
        if request.expires_at.is_some() {
            announcement.expires_at = request.expires_at;
        }
        announcement.updated_at = Utc::now();

        self.ctx.announcement_repo().update(&announcement).await?;
        Ok(announcement)
    }

    /// Delete an announcement
    #[instrument(skip(self))]
    pub async fn delete_announcement(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        announcement_id: Snowflake,
    ) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        self.load(channel_id, announcement_id).await?;
        self.ctx.announcement_repo().delete(announcement_id).await?;

        info!(channel_id = %channel_id, announcement_id = %announcement_id, "Announcement deleted");
        Ok(())
    }

    /// Flip the pinned flag
    #[instrument(skip(self))]
    pub async fn toggle_pin(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        announcement_id: Snowflake,
    ) -> ServiceResult<Announcement> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut announcement = self.load(channel_id, announcement_id).await?;
        announcement.is_pinned = !announcement.is_pinned;
        announcement.updated_at = Utc::now();

        self.ctx.announcement_repo().update(&announcement).await?;

        info!(announcement_id = %announcement_id, pinned = announcement.is_pinned, "Announcement pin toggled");
        Ok(announcement)
    }

    async fn load(&self, channel_id: Snowflake, announcement_id: Snowflake) -> ServiceResult<Announcement> {
        let announcement = self
            .ctx
            .announcement_repo()
            .find(announcement_id)
            .await?
            .ok_or(DomainError::AnnouncementNotFound)?;
        ensure_in_channel(announcement.channel_id, channel_id, || DomainError::AnnouncementNotFound)?;
        Ok(announcement)
    }
}
