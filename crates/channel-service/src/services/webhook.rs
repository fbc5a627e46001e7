//! Webhook service
//!
//! Webhooks expose integration targets, so every operation, reads included,
//! requires owner or admin.

use channel_core::{DomainError, EventType, Snowflake, Webhook};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateWebhookRequest, UpdateWebhookRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Webhook service
pub struct WebhookService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WebhookService<'a> {
    /// Create a new WebhookService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a webhook
    #[instrument(skip(self, request))]
    pub async fn create_webhook(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateWebhookRequest,
    ) -> ServiceResult<Webhook> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut webhook = Webhook::new(
            self.ctx.generate_id(),
            channel_id,
            request.name,
            request.url,
            request.events,
            user_id,
        );
        webhook.avatar_url = request.avatar_url;

        self.ctx.webhook_repo().create(&webhook).await?;

        info!(channel_id = %channel_id, webhook_id = %webhook.id, "Webhook created");
        Ok(webhook)
    }

    /// List a channel's webhooks
    #[instrument(skip(self))]
    pub async fn list_webhooks(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Webhook>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        Ok(self.ctx.webhook_repo().list(channel_id).await?)
    }

    /// Patch a webhook
    #[instrument(skip(self, request))]
    pub async fn update_webhook(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        webhook_id: Snowflake,
        request: UpdateWebhookRequest,
    ) -> ServiceResult<Webhook> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;

        let mut webhook = self.load(channel_id, webhook_id).await?;
        if let Some(name) = request.name {
            webhook.name = name;
        }
        if let Some(url) = request.url {
            webhook.url = url;
        }
        if request.avatar_url.is_some() {
            webhook.avatar_url = request.avatar_url;
        }
        if let Some(events) = request.events {
            webhook.events = events;
        }
        if let Some(active) = request.is_active {
            webhook.is_active = active;
        }
        webhook.updated_at = Utc::now();

        self.ctx.webhook_repo().update(&webhook).await?;

        info!(webhook_id = %webhook_id, active = webhook.is_active, "Webhook updated");
        Ok(webhook)
    }

    /// Delete a webhook
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self, channel_id: Snowflake, user_id: Snowflake, webhook_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        self.load(channel_id, webhook_id).await?;
        self.ctx.webhook_repo().delete(webhook_id).await?;

        info!(webhook_id = %webhook_id, "Webhook deleted");
        Ok(())
    }

    /// Stamp a test trigger and announce it on the event stream
    #[instrument(skip(self))]
    pub async fn test_webhook(&self, channel_id: Snowflake, user_id: Snowflake, webhook_id: Snowflake) -> ServiceResult<Webhook> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        let mut webhook = self.load(channel_id, webhook_id).await?;

        let now = Utc::now();
        self.ctx.webhook_repo().touch(webhook_id, now).await?;
        webhook.last_triggered_at = Some(now);

        self.ctx
            .emit(
                EventType::WebhookTested,
                channel_id,
                user_id,
                &json!({ "webhook_id": webhook_id, "url": &webhook.url }),
            )
            .await;
        Ok(webhook)
    }

    async fn load(&self, channel_id: Snowflake, webhook_id: Snowflake) -> ServiceResult<Webhook> {
        let webhook = self
            .ctx
            .webhook_repo()
            .find(webhook_id)
            .await?
            .ok_or(DomainError::WebhookNotFound)?;
        ensure_in_channel(webhook.channel_id, channel_id, || DomainError::WebhookNotFound)?;
        Ok(webhook)
    }
}
