//! PostgreSQL implementation of StarredRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, RepoResult, Snowflake, StarredChannel, StarredRepository};

use crate::models::StarredModel;

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of StarredRepository
#[derive(Clone)]
pub struct PgStarredRepository {
    pool: PgPool,
}

impl PgStarredRepository {
    /// Create a new PgStarredRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StarredRepository for PgStarredRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: Snowflake, channel_id: Snowflake) -> RepoResult<Option<StarredChannel>> {
        let result = sqlx::query_as::<_, StarredModel>(
            r"
            SELECT id, user_id, channel_id, position, created_at
            FROM starred_channels
            WHERE user_id = $1 AND channel_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StarredChannel::from))
    }

    #[instrument(skip(self))]
    async fn next_position(&self, user_id: Snowflake) -> RepoResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM starred_channels WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, starred), fields(channel_id = %starred.channel_id))]
    async fn create(&self, starred: &StarredChannel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO starred_channels (id, user_id, channel_id, position, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(starred.id.into_inner())
        .bind(starred.user_id.into_inner())
        .bind(starred.channel_id.into_inner())
        .bind(starred.position)
        .bind(starred.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyStarred))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Snowflake, channel_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM starred_channels WHERE user_id = $1 AND channel_id = $2")
            .bind(user_id.into_inner())
            .bind(channel_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::NotStarred)
    }

    #[instrument(skip(self))]
    async fn list(&self, user_id: Snowflake) -> RepoResult<Vec<StarredChannel>> {
        let results = sqlx::query_as::<_, StarredModel>(
            r"
            SELECT id, user_id, channel_id, position, created_at
            FROM starred_channels
            WHERE user_id = $1
            ORDER BY position
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(StarredChannel::from).collect())
    }
}
