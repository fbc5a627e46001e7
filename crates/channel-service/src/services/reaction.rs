//! Reaction service
//!
//! Handles message reactions (add, remove, query).

use channel_core::{DomainError, EventType, Reaction, ReactionSummary, Snowflake};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::AddReactionRequest;

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add reaction to a message
    #[instrument(skip(self, request))]
    pub async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        request: AddReactionRequest,
    ) -> ServiceResult<Reaction> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        // Fast path; the unique index is the real guard
        if self
            .ctx
            .reaction_repo()
            .find(channel_id, message_id, user_id, &request.emoji)
            .await?
            .is_some()
        {
            return Err(DomainError::ReactionExists.into());
        }

        let reaction = Reaction::new(self.ctx.generate_id(), channel_id, message_id, user_id, request.emoji);
        self.ctx.reaction_repo().create(&reaction).await?;

        info!(message_id = %message_id, emoji = %reaction.emoji, "Reaction added");

        self.ctx.emit(EventType::ReactionAdded, channel_id, user_id, &reaction).await;
        Ok(reaction)
    }

    /// Remove the caller's reaction
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let reaction = self
            .ctx
            .reaction_repo()
            .find(channel_id, message_id, user_id, emoji)
            .await?
            .ok_or(DomainError::ReactionNotFound)?;

        self.ctx.reaction_repo().delete(reaction.id).await?;

        info!(message_id = %message_id, emoji = %emoji, "Reaction removed");

        self.ctx
            .emit(
                EventType::ReactionRemoved,
                channel_id,
                user_id,
                &json!({ "message_id": message_id, "emoji": emoji }),
            )
            .await;
        Ok(())
    }

    /// All reactions on a message
    #[instrument(skip(self))]
    pub async fn list_reactions(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<Reaction>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.reaction_repo().list_by_message(channel_id, message_id).await?)
    }

    /// Counts per emoji on a message
    #[instrument(skip(self))]
    pub async fn reaction_summary(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ReactionSummary>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.reaction_repo().summary(channel_id, message_id).await?)
    }
}
