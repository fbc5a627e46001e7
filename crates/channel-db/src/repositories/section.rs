//! PostgreSQL implementation of SectionRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, RepoResult, Section, SectionRepository, Snowflake};

use crate::models::SectionModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of SectionRepository
#[derive(Clone)]
pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    /// Create a new PgSectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Section>> {
        let result = sqlx::query_as::<_, SectionModel>(
            r"
            SELECT id, workspace_id, user_id, name, position, is_collapsed, channel_ids,
                   created_at, updated_at
            FROM channel_sections
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Section::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Section>> {
        let results = sqlx::query_as::<_, SectionModel>(
            r"
            SELECT id, workspace_id, user_id, name, position, is_collapsed, channel_ids,
                   created_at, updated_at
            FROM channel_sections
            WHERE workspace_id = $1 AND user_id = $2
            ORDER BY position
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Section::from).collect())
    }

    #[instrument(skip(self))]
    async fn next_position(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r"
            SELECT COALESCE(MAX(position) + 1, 0)
            FROM channel_sections
            WHERE workspace_id = $1 AND user_id = $2
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, section), fields(section_id = %section.id))]
    async fn create(&self, section: &Section) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_sections (id, workspace_id, user_id, name, position, is_collapsed,
                                          channel_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(section.id.into_inner())
        .bind(section.workspace_id.into_inner())
        .bind(section.user_id.into_inner())
        .bind(&section.name)
        .bind(section.position)
        .bind(section.is_collapsed)
        .bind(Json(&section.channel_ids))
        .bind(section.created_at)
        .bind(section.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, section), fields(section_id = %section.id))]
    async fn update(&self, section: &Section) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_sections
            SET name = $2, position = $3, is_collapsed = $4, channel_ids = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(section.id.into_inner())
        .bind(&section.name)
        .bind(section.position)
        .bind(section.is_collapsed)
        .bind(Json(&section.channel_ids))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::SectionNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_sections WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::SectionNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSectionRepository>();
    }
}
