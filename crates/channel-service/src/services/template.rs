//! Channel template service
//!
//! Templates capture a channel archetype (type, description, topic and a
//! settings blob) for a workspace. Applying one creates a channel from it.

use channel_core::{Channel, ChannelSettings, ChannelTemplate, DomainError, Snowflake};
use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    ApplyTemplateRequest, CreateTemplateFromChannelRequest, CreateTemplateRequest, UpdateSettingsRequest,
    UpdateTemplateRequest,
};

use super::access::ChannelAccess;
use super::channel::ChannelService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::settings;

/// Channel template service
pub struct TemplateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TemplateService<'a> {
    /// Create a new TemplateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a template from scratch
    #[instrument(skip(self, request), fields(workspace_id = %request.workspace_id))]
    pub async fn create_template(&self, user_id: Snowflake, request: CreateTemplateRequest) -> ServiceResult<ChannelTemplate> {
        request.validate()?;

        let mut template = ChannelTemplate::new(
            self.ctx.generate_id(),
            request.workspace_id,
            request.name,
            request.channel_type,
            user_id,
        );
        template.description = request.description;
        template.topic = request.topic;
        template.settings = request.settings;

        self.ctx.template_repo().create(&template).await?;

        info!(template_id = %template.id, "Template created");
        Ok(template)
    }

    /// Snapshot an existing channel as a template
    #[instrument(skip(self, request))]
    pub async fn create_from_channel(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateTemplateFromChannelRequest,
    ) -> ServiceResult<ChannelTemplate> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        let channel = access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        let mut template = ChannelTemplate::new(
            self.ctx.generate_id(),
            channel.workspace_id,
            request.name,
            channel.channel_type,
            user_id,
        );
        template.description = request.description.or(channel.description);
        template.topic = channel.topic;
        template.settings = match self.ctx.settings_repo().find(channel_id).await? {
            Some(stored) => serde_json::to_value(&stored).ok(),
            None => None,
        };

        self.ctx.template_repo().create(&template).await?;

        info!(template_id = %template.id, channel_id = %channel_id, "Template created from channel");
        Ok(template)
    }

    /// Get a template
    #[instrument(skip(self))]
    pub async fn get_template(&self, template_id: Snowflake) -> ServiceResult<ChannelTemplate> {
        self.load(template_id).await
    }

    /// Templates in a workspace, most used first
    #[instrument(skip(self))]
    pub async fn list_templates(&self, workspace_id: Snowflake) -> ServiceResult<Vec<ChannelTemplate>> {
        Ok(self.ctx.template_repo().list(workspace_id).await?)
    }

    /// Edit a template (creator only)
    #[instrument(skip(self, request))]
    pub async fn update_template(
        &self,
        user_id: Snowflake,
        template_id: Snowflake,
        request: UpdateTemplateRequest,
    ) -> ServiceResult<ChannelTemplate> {
        request.validate()?;

        let mut template = self.load_own(user_id, template_id).await?;
        if let Some(name) = request.name {
            template.name = name;
        }
        if request.description.is_some() {
            template.description = request.description;
        }
        if request.topic.is_some() {
            template.topic = request.topic;
        }
        if request.settings.is_some() {
            template.settings = request.settings;
        }
        template.updated_at = Utc::now();

        self.ctx.template_repo().update(&template).await?;
        Ok(template)
    }

    /// Delete a template (creator only)
    #[instrument(skip(self))]
    pub async fn delete_template(&self, user_id: Snowflake, template_id: Snowflake) -> ServiceResult<()> {
        self.load_own(user_id, template_id).await?;
        self.ctx.template_repo().delete(template_id).await?;

        info!(template_id = %template_id, "Template deleted");
        Ok(())
    }

    /// Create a channel from a template
    #[instrument(skip(self, request))]
    pub async fn apply_template(
        &self,
        user_id: Snowflake,
        template_id: Snowflake,
        request: ApplyTemplateRequest,
    ) -> ServiceResult<Channel> {
        request.validate()?;

        let template = self.load(template_id).await?;

        let mut channel = Channel::new(
            self.ctx.generate_id(),
            template.workspace_id,
            request.channel_name.trim().to_string(),
            template.channel_type,
            user_id,
        )
        .with_description(template.description.clone());
        channel.topic = template.topic.clone();

        let channel_id = channel.id;
        let channels = ChannelService::new(self.ctx);
        let mut new = channels.draft(channel, user_id);
        new.settings = template
            .settings
            .clone()
            .and_then(|blob| settings_from_blob(channel_id, blob));
        channels.insert_channel(&new).await?;
        self.ctx.template_repo().increment_use(template_id).await?;

        info!(template_id = %template_id, channel_id = %new.channel.id, "Template applied");
        Ok(new.channel)
    }

    async fn load(&self, template_id: Snowflake) -> ServiceResult<ChannelTemplate> {
        Ok(self
            .ctx
            .template_repo()
            .find(template_id)
            .await?
            .ok_or(DomainError::TemplateNotFound)?)
    }

    async fn load_own(&self, user_id: Snowflake, template_id: Snowflake) -> ServiceResult<ChannelTemplate> {
        let template = self.load(template_id).await?;
        if !template.is_created_by(user_id) {
            return Err(DomainError::NotAuthorized.into());
        }
        Ok(template)
    }
}

/// Settings for a new channel from a template blob; unreadable blobs are skipped, not fatal
fn settings_from_blob(channel_id: Snowflake, blob: serde_json::Value) -> Option<ChannelSettings> {
    let patch = match serde_json::from_value::<UpdateSettingsRequest>(blob) {
        Ok(patch) if patch.validate().is_ok() => patch,
        _ => {
            warn!(channel_id = %channel_id, "Ignoring unusable template settings");
            return None;
        }
    };

    let mut stored = ChannelSettings::defaults(channel_id);
    settings::apply(&mut stored, &patch);
    Some(stored)
}
