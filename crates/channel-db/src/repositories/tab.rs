//! PostgreSQL implementation of TabRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ChannelTab, DomainError, RepoResult, Snowflake, TabRepository};

use crate::models::TabModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of TabRepository
#[derive(Clone)]
pub struct PgTabRepository {
    pool: PgPool,
}

impl PgTabRepository {
    /// Create a new PgTabRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TabRepository for PgTabRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelTab>> {
        let result = sqlx::query_as::<_, TabModel>(
            r"
            SELECT id, channel_id, name, tab_type, config, position, created_by, created_at, updated_at
            FROM channel_tabs
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelTab::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelTab>> {
        let results = sqlx::query_as::<_, TabModel>(
            r"
            SELECT id, channel_id, name, tab_type, config, position, created_by, created_at, updated_at
            FROM channel_tabs
            WHERE channel_id = $1
            ORDER BY position
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChannelTab::from).collect())
    }

    #[instrument(skip(self))]
    async fn next_position(&self, channel_id: Snowflake) -> RepoResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM channel_tabs WHERE channel_id = $1",
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, tab), fields(tab_id = %tab.id))]
    async fn create(&self, tab: &ChannelTab) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_tabs (id, channel_id, name, tab_type, config, position, created_by,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(tab.id.into_inner())
        .bind(tab.channel_id.into_inner())
        .bind(&tab.name)
        .bind(&tab.tab_type)
        .bind(&tab.config)
        .bind(tab.position)
        .bind(tab.created_by.into_inner())
        .bind(tab.created_at)
        .bind(tab.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, tab), fields(tab_id = %tab.id))]
    async fn update(&self, tab: &ChannelTab) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_tabs
            SET name = $2, tab_type = $3, config = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(tab.id.into_inner())
        .bind(&tab.name)
        .bind(&tab.tab_type)
        .bind(&tab.config)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::TabNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_tabs WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::TabNotFound)
    }

    #[instrument(skip(self, tab_ids), fields(count = tab_ids.len()))]
    async fn reorder(&self, channel_id: Snowflake, tab_ids: &[Snowflake]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (index, tab_id) in tab_ids.iter().enumerate() {
            let position = i32::try_from(index)
                .map_err(|_| DomainError::ValidationError("too many tabs".to_string()))?;

            let result = sqlx::query(
                r"
                UPDATE channel_tabs
                SET position = $3, updated_at = NOW()
                WHERE id = $1 AND channel_id = $2
                ",
            )
            .bind(tab_id.into_inner())
            .bind(channel_id.into_inner())
            .bind(position)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            expect_rows(result.rows_affected(), || DomainError::TabNotFound)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
