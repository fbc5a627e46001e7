//! PostgreSQL implementation of VoiceRepository
//!
//! A session is live while `disconnected_at` is NULL; the partial unique
//! index allows one live session per user and channel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, RepoResult, Snowflake, VoiceRepository, VoiceState};

use crate::models::VoiceStateModel;

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of VoiceRepository
#[derive(Clone)]
pub struct PgVoiceRepository {
    pool: PgPool,
}

impl PgVoiceRepository {
    /// Create a new PgVoiceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoiceRepository for PgVoiceRepository {
    #[instrument(skip(self))]
    async fn find_active(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<VoiceState>> {
        let result = sqlx::query_as::<_, VoiceStateModel>(
            r"
            SELECT id, channel_id, user_id, is_muted, is_deafened, is_screen_share, is_video_on,
                   joined_at, disconnected_at
            FROM voice_channel_states
            WHERE channel_id = $1 AND user_id = $2 AND disconnected_at IS NULL
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(VoiceState::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self, channel_id: Snowflake) -> RepoResult<Vec<VoiceState>> {
        let results = sqlx::query_as::<_, VoiceStateModel>(
            r"
            SELECT id, channel_id, user_id, is_muted, is_deafened, is_screen_share, is_video_on,
                   joined_at, disconnected_at
            FROM voice_channel_states
            WHERE channel_id = $1 AND disconnected_at IS NULL
            ORDER BY joined_at
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(VoiceState::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_active(&self, channel_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM voice_channel_states WHERE channel_id = $1 AND disconnected_at IS NULL",
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, state), fields(channel_id = %state.channel_id, user_id = %state.user_id))]
    async fn create(&self, state: &VoiceState) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO voice_channel_states (id, channel_id, user_id, is_muted, is_deafened,
                                              is_screen_share, is_video_on, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(state.id.into_inner())
        .bind(state.channel_id.into_inner())
        .bind(state.user_id.into_inner())
        .bind(state.is_muted)
        .bind(state.is_deafened)
        .bind(state.is_screen_share)
        .bind(state.is_video_on)
        .bind(state.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInVoice))?;

        Ok(())
    }

    #[instrument(skip(self, state), fields(session_id = %state.id))]
    async fn update_flags(&self, state: &VoiceState) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE voice_channel_states
            SET is_muted = $2, is_deafened = $3, is_screen_share = $4, is_video_on = $5
            WHERE id = $1 AND disconnected_at IS NULL
            ",
        )
        .bind(state.id.into_inner())
        .bind(state.is_muted)
        .bind(state.is_deafened)
        .bind(state.is_screen_share)
        .bind(state.is_video_on)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::NotInVoice)
    }

    #[instrument(skip(self))]
    async fn disconnect(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE voice_channel_states SET disconnected_at = $2 WHERE id = $1 AND disconnected_at IS NULL",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::NotInVoice)
    }
}
