//! PostgreSQL implementation of TemplateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ChannelTemplate, DomainError, RepoResult, Snowflake, TemplateRepository};

use crate::models::TemplateModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of TemplateRepository
#[derive(Clone)]
pub struct PgTemplateRepository {
    pool: PgPool,
}

impl PgTemplateRepository {
    /// Create a new PgTemplateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelTemplate>> {
        let result = sqlx::query_as::<_, TemplateModel>(
            r"
            SELECT id, workspace_id, name, description, type, topic, settings, use_count,
                   created_by, created_at, updated_at
            FROM channel_templates
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelTemplate::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, workspace_id: Snowflake) -> RepoResult<Vec<ChannelTemplate>> {
        let results = sqlx::query_as::<_, TemplateModel>(
            r"
            SELECT id, workspace_id, name, description, type, topic, settings, use_count,
                   created_by, created_at, updated_at
            FROM channel_templates
            WHERE workspace_id = $1
            ORDER BY use_count DESC, name
            ",
        )
        .bind(workspace_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChannelTemplate::from).collect())
    }

    #[instrument(skip(self, template), fields(template_id = %template.id))]
    async fn create(&self, template: &ChannelTemplate) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_templates (id, workspace_id, name, description, type, topic, settings,
                                           use_count, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(template.id.into_inner())
        .bind(template.workspace_id.into_inner())
        .bind(&template.name)
        .bind(&template.description)
        .bind(template.channel_type.as_str())
        .bind(&template.topic)
        .bind(&template.settings)
        .bind(template.use_count)
        .bind(template.created_by.into_inner())
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, template), fields(template_id = %template.id))]
    async fn update(&self, template: &ChannelTemplate) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_templates
            SET name = $2, description = $3, type = $4, topic = $5, settings = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(template.id.into_inner())
        .bind(&template.name)
        .bind(&template.description)
        .bind(template.channel_type.as_str())
        .bind(&template.topic)
        .bind(&template.settings)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::TemplateNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_templates WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::TemplateNotFound)
    }

    #[instrument(skip(self))]
    async fn increment_use(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE channel_templates SET use_count = use_count + 1 WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::TemplateNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTemplateRepository>();
    }
}
