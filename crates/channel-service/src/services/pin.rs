//! Pin service

use channel_core::{DomainError, EventType, Pin, Snowflake};
use serde_json::json;
use tracing::{info, instrument};

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Pin service
pub struct PinService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PinService<'a> {
    /// Create a new PinService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Pin a message; one pin per message
    #[instrument(skip(self))]
    pub async fn pin_message(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<Pin> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        if self.ctx.pin_repo().find(channel_id, message_id).await?.is_some() {
            return Err(DomainError::AlreadyPinned.into());
        }

        let pin = Pin::new(self.ctx.generate_id(), channel_id, message_id, user_id);
        self.ctx.pin_repo().create(&pin).await?;

        info!(channel_id = %channel_id, message_id = %message_id, "Message pinned");

        self.ctx.emit(EventType::MessagePinned, channel_id, user_id, &pin).await;
        Ok(pin)
    }

    /// Unpin a message; any member may unpin
    #[instrument(skip(self))]
    pub async fn unpin_message(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        if self.ctx.pin_repo().find(channel_id, message_id).await?.is_none() {
            return Err(DomainError::PinNotFound.into());
        }
        self.ctx.pin_repo().delete(channel_id, message_id).await?;

        info!(channel_id = %channel_id, message_id = %message_id, "Message unpinned");

        self.ctx
            .emit(EventType::MessageUnpinned, channel_id, user_id, &json!({ "message_id": message_id }))
            .await;
        Ok(())
    }

    /// Pins, newest first
    #[instrument(skip(self))]
    pub async fn list_pins(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Pin>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.pin_repo().list(channel_id).await?)
    }
}
