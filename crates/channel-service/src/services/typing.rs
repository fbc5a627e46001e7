//! Typing indicators
//!
//! Presence lives only in the cache with a short TTL. Without a cache both
//! operations are no-ops.

use channel_core::{EventType, Snowflake};
use serde_json::json;
use tracing::{instrument, warn};

use crate::dto::TypingResponse;

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Typing indicator service
pub struct TypingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TypingService<'a> {
    /// Create a new TypingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark the caller as typing
    #[instrument(skip(self))]
    pub async fn set_typing(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let Some(cache) = self.ctx.cache() else {
            return Ok(());
        };
        if let Err(e) = cache.set_typing(channel_id, user_id).await {
            warn!(channel_id = %channel_id, error = %e, "Failed to record typing");
            return Ok(());
        }

        self.ctx
            .emit(EventType::TypingStarted, channel_id, user_id, &json!({ "user_id": user_id }))
            .await;
        Ok(())
    }

    /// Users typing right now
    #[instrument(skip(self))]
    pub async fn get_typing(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<TypingResponse> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let user_ids = match self.ctx.cache() {
            Some(cache) => cache.typing_users(channel_id).await.unwrap_or_else(|e| {
                warn!(channel_id = %channel_id, error = %e, "Failed to read typing users");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(TypingResponse { channel_id, user_ids })
    }
}
