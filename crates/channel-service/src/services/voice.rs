//! Voice presence service
//!
//! One live presence row per (channel, user); leaving stamps the row rather
//! than deleting it.

use channel_core::{DomainError, EventType, Snowflake, VoiceState, VoiceStatePatch};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Voice presence service
pub struct VoiceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoiceService<'a> {
    /// Create a new VoiceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join the channel's voice room
    #[instrument(skip(self))]
    pub async fn join(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<VoiceState> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        if self.ctx.voice_repo().find_active(channel_id, user_id).await?.is_some() {
            return Err(DomainError::AlreadyInVoice.into());
        }

        let state = VoiceState::new(self.ctx.generate_id(), channel_id, user_id);
        self.ctx.voice_repo().create(&state).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Joined voice");

        self.ctx.emit(EventType::VoiceJoined, channel_id, user_id, &state).await;
        Ok(state)
    }

    /// Leave the voice room
    #[instrument(skip(self))]
    pub async fn leave(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let state = self.active(channel_id, user_id).await?;
        self.ctx.voice_repo().disconnect(state.id, Utc::now()).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Left voice");

        self.ctx
            .emit(EventType::VoiceLeft, channel_id, user_id, &json!({ "user_id": user_id }))
            .await;
        Ok(())
    }

    /// Change only the flags present in the patch
    #[instrument(skip(self))]
    pub async fn update_state(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        patch: VoiceStatePatch,
    ) -> ServiceResult<VoiceState> {
        if patch.is_empty() {
            return Err(ServiceError::validation("No voice state fields to update"));
        }

        let mut state = self.active(channel_id, user_id).await?;
        state.apply(&patch);
        self.ctx.voice_repo().update_flags(&state).await?;
        Ok(state)
    }

    /// Connected participants, earliest first
    #[instrument(skip(self))]
    pub async fn list_participants(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<VoiceState>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.voice_repo().list_active(channel_id).await?)
    }

    /// Number of connected participants
    #[instrument(skip(self))]
    pub async fn count_participants(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<i64> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.voice_repo().count_active(channel_id).await?)
    }

    async fn active(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<VoiceState> {
        Ok(self
            .ctx
            .voice_repo()
            .find_active(channel_id, user_id)
            .await?
            .ok_or(DomainError::NotInVoice)?)
    }
}
