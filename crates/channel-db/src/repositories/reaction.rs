//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, Reaction, ReactionRepository, ReactionSummary, RepoResult, Snowflake};

use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, channel_id, message_id, user_id, emoji, created_at
            FROM channel_reactions
            WHERE channel_id = $1 AND message_id = $2 AND user_id = $3 AND emoji = $4
            ",
        )
        .bind(channel_id.into_inner())
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .bind(emoji)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn list_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, channel_id, message_id, user_id, emoji, created_at
            FROM channel_reactions
            WHERE channel_id = $1 AND message_id = $2
            ORDER BY created_at
            ",
        )
        .bind(channel_id.into_inner())
        .bind(message_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn summary(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<ReactionSummary>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT emoji, COUNT(*) AS count
            FROM channel_reactions
            WHERE channel_id = $1 AND message_id = $2
            GROUP BY emoji
            ORDER BY count DESC, emoji
            ",
        )
        .bind(channel_id.into_inner())
        .bind(message_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionSummary::from).collect())
    }

    #[instrument(skip(self, reaction), fields(message_id = %reaction.message_id))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_reactions (id, channel_id, message_id, user_id, emoji, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.channel_id.into_inner())
        .bind(reaction.message_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(&reaction.emoji)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReactionExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_reactions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ReactionNotFound)
    }
}
