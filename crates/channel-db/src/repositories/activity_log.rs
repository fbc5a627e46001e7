//! PostgreSQL implementation of ActivityLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ActivityLogEntry, ActivityLogRepository, Page, RepoResult, Snowflake};

use crate::models::ActivityLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ActivityLogRepository
#[derive(Clone)]
pub struct PgActivityLogRepository {
    pool: PgPool,
}

impl PgActivityLogRepository {
    /// Create a new PgActivityLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for PgActivityLogRepository {
    #[instrument(skip(self, entry), fields(channel_id = %entry.channel_id, action = %entry.action))]
    async fn create(&self, entry: &ActivityLogEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_activity_log (id, channel_id, user_id, action, target_id, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.channel_id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(&entry.action)
        .bind(&entry.target_id)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_channel(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<ActivityLogEntry>> {
        let results = sqlx::query_as::<_, ActivityLogModel>(
            r"
            SELECT id, channel_id, user_id, action, target_id, details, created_at
            FROM channel_activity_log
            WHERE channel_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(channel_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActivityLogEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<ActivityLogEntry>> {
        let results = sqlx::query_as::<_, ActivityLogModel>(
            r"
            SELECT id, channel_id, user_id, action, target_id, details, created_at
            FROM channel_activity_log
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActivityLogEntry::from).collect())
    }
}
