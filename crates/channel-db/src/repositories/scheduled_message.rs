//! PostgreSQL implementation of ScheduledMessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, RepoResult, ScheduledMessage, ScheduledMessageRepository, Snowflake};

use crate::models::ScheduledMessageModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of ScheduledMessageRepository
#[derive(Clone)]
pub struct PgScheduledMessageRepository {
    pool: PgPool,
}

impl PgScheduledMessageRepository {
    /// Create a new PgScheduledMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduledMessageRepository for PgScheduledMessageRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ScheduledMessage>> {
        let result = sqlx::query_as::<_, ScheduledMessageModel>(
            r"
            SELECT id, channel_id, user_id, content, scheduled_at, status, sent_at, thread_id,
                   created_at, updated_at
            FROM scheduled_messages
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ScheduledMessage::from))
    }

    #[instrument(skip(self))]
    async fn list_by_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<ScheduledMessage>> {
        let results = sqlx::query_as::<_, ScheduledMessageModel>(
            r"
            SELECT id, channel_id, user_id, content, scheduled_at, status, sent_at, thread_id,
                   created_at, updated_at
            FROM scheduled_messages
            WHERE channel_id = $1 AND user_id = $2
            ORDER BY scheduled_at
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ScheduledMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_pending_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<ScheduledMessage>> {
        let results = sqlx::query_as::<_, ScheduledMessageModel>(
            r"
            SELECT id, channel_id, user_id, content, scheduled_at, status, sent_at, thread_id,
                   created_at, updated_at
            FROM scheduled_messages
            WHERE user_id = $1 AND status = 'pending'
            ORDER BY scheduled_at
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ScheduledMessage::from).collect())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &ScheduledMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO scheduled_messages (id, channel_id, user_id, content, scheduled_at, status,
                                            sent_at, thread_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.channel_id.into_inner())
        .bind(message.user_id.into_inner())
        .bind(&message.content)
        .bind(message.scheduled_at)
        .bind(message.status.as_str())
        .bind(message.sent_at)
        .bind(message.thread_id.map(Snowflake::into_inner))
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id, status = message.status.as_str()))]
    async fn update(&self, message: &ScheduledMessage) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE scheduled_messages
            SET content = $2, scheduled_at = $3, status = $4, sent_at = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(message.id.into_inner())
        .bind(&message.content)
        .bind(message.scheduled_at)
        .bind(message.status.as_str())
        .bind(message.sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ScheduledMessageNotFound)
    }

    #[instrument(skip(self))]
    async fn pending_before(&self, before: DateTime<Utc>, limit: i64) -> RepoResult<Vec<ScheduledMessage>> {
        let results = sqlx::query_as::<_, ScheduledMessageModel>(
            r"
            SELECT id, channel_id, user_id, content, scheduled_at, status, sent_at, thread_id,
                   created_at, updated_at
            FROM scheduled_messages
            WHERE status = 'pending' AND scheduled_at <= $1
            ORDER BY scheduled_at
            LIMIT $2
            ",
        )
        .bind(before)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ScheduledMessage::from).collect())
    }
}
