//! PostgreSQL implementation of LinkRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ChannelLink, DomainError, LinkRepository, RepoResult, Snowflake};

use crate::models::LinkModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of LinkRepository
#[derive(Clone)]
pub struct PgLinkRepository {
    pool: PgPool,
}

impl PgLinkRepository {
    /// Create a new PgLinkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelLink>> {
        let result = sqlx::query_as::<_, LinkModel>(
            r"
            SELECT id, source_channel_id, target_channel_id, created_by, link_type, is_active,
                   created_at, updated_at
            FROM channel_links
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelLink::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelLink>> {
        let results = sqlx::query_as::<_, LinkModel>(
            r"
            SELECT id, source_channel_id, target_channel_id, created_by, link_type, is_active,
                   created_at, updated_at
            FROM channel_links
            WHERE is_active = TRUE AND (source_channel_id = $1 OR target_channel_id = $1)
            ORDER BY created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChannelLink::from).collect())
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn create(&self, link: &ChannelLink) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_links (id, source_channel_id, target_channel_id, created_by, link_type,
                                       is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(link.id.into_inner())
        .bind(link.source_channel_id.into_inner())
        .bind(link.target_channel_id.into_inner())
        .bind(link.created_by.into_inner())
        .bind(link.link_type.as_str())
        .bind(link.is_active)
        .bind(link.created_at)
        .bind(link.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE channel_links SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::LinkNotFound)
    }
}
