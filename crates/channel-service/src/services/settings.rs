//! Channel settings service
//!
//! One row per channel. A missing row reads as the defaults.

use channel_core::entities::activity_log::actions;
use channel_core::{ActivityLogEntry, ChannelSettings, EventType, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::UpdateSettingsRequest;

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Channel settings service
pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    /// Create a new SettingsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current settings, defaults when none are stored
    #[instrument(skip(self))]
    pub async fn get_settings(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelSettings> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.current(channel_id).await
    }

    /// Apply a partial update and store the result
    #[instrument(skip(self, request))]
    pub async fn update_settings(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<ChannelSettings> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        let mut settings = self.current(channel_id).await?;
        apply(&mut settings, &request);
        settings.updated_at = Utc::now();

        self.ctx.settings_repo().upsert(&settings).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Channel settings updated");

        self.ctx
            .record_activity(
                ActivityLogEntry::new(self.ctx.generate_id(), channel_id, user_id, actions::SETTINGS_UPDATED)
                    .with_details(serde_json::to_value(&settings).unwrap_or_default()),
            )
            .await;
        self.ctx
            .emit(EventType::SettingsUpdated, channel_id, user_id, &settings)
            .await;
        Ok(settings)
    }

    async fn current(&self, channel_id: Snowflake) -> ServiceResult<ChannelSettings> {
        Ok(self
            .ctx
            .settings_repo()
            .find(channel_id)
            .await?
            .unwrap_or_else(|| ChannelSettings::defaults(channel_id)))
    }
}

pub(crate) fn apply(settings: &mut ChannelSettings, patch: &UpdateSettingsRequest) {
    if let Some(v) = patch.slow_mode_interval {
        settings.slow_mode_interval = v;
    }
    if let Some(v) = patch.max_pins {
        settings.max_pins = v;
    }
    if let Some(v) = patch.max_bookmarks {
        settings.max_bookmarks = v;
    }
    if let Some(v) = patch.allow_threads {
        settings.allow_threads = v;
    }
    if let Some(v) = patch.allow_reactions {
        settings.allow_reactions = v;
    }
    if let Some(v) = patch.allow_invites {
        settings.allow_invites = v;
    }
    if let Some(v) = patch.auto_archive_days {
        settings.auto_archive_days = v;
    }
    if let Some(v) = patch.default_notification {
        settings.default_notification = v;
    }
    if let Some(v) = patch.custom_emoji {
        settings.custom_emoji = v;
    }
    if let Some(v) = patch.link_previews {
        settings.link_previews = v;
    }
    if let Some(v) = patch.member_limit {
        settings.member_limit = v;
    }
}
