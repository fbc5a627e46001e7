//! PostgreSQL implementation of WebhookRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, RepoResult, Snowflake, Webhook, WebhookRepository};

use crate::models::WebhookModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of WebhookRepository
#[derive(Clone)]
pub struct PgWebhookRepository {
    pool: PgPool,
}

impl PgWebhookRepository {
    /// Create a new PgWebhookRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebhookRepository for PgWebhookRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Webhook>> {
        let result = sqlx::query_as::<_, WebhookModel>(
            r"
            SELECT id, channel_id, name, url, avatar_url, events, is_active, created_by,
                   last_triggered_at, created_at, updated_at
            FROM channel_webhooks
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Webhook::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Webhook>> {
        let results = sqlx::query_as::<_, WebhookModel>(
            r"
            SELECT id, channel_id, name, url, avatar_url, events, is_active, created_by,
                   last_triggered_at, created_at, updated_at
            FROM channel_webhooks
            WHERE channel_id = $1
            ORDER BY created_at
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Webhook::from).collect())
    }

    #[instrument(skip(self, webhook), fields(webhook_id = %webhook.id))]
    async fn create(&self, webhook: &Webhook) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_webhooks (id, channel_id, name, url, avatar_url, events, is_active,
                                          created_by, last_triggered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(webhook.id.into_inner())
        .bind(webhook.channel_id.into_inner())
        .bind(&webhook.name)
        .bind(&webhook.url)
        .bind(&webhook.avatar_url)
        .bind(Json(&webhook.events))
        .bind(webhook.is_active)
        .bind(webhook.created_by.into_inner())
        .bind(webhook.last_triggered_at)
        .bind(webhook.created_at)
        .bind(webhook.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, webhook), fields(webhook_id = %webhook.id))]
    async fn update(&self, webhook: &Webhook) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_webhooks
            SET name = $2, url = $3, avatar_url = $4, events = $5, is_active = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(webhook.id.into_inner())
        .bind(&webhook.name)
        .bind(&webhook.url)
        .bind(&webhook.avatar_url)
        .bind(Json(&webhook.events))
        .bind(webhook.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::WebhookNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_webhooks WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::WebhookNotFound)
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query("UPDATE channel_webhooks SET last_triggered_at = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::WebhookNotFound)
    }
}
