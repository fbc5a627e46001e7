//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{
    Channel, ChannelRepository, ChannelStats, DailyActivity, DomainError, NewChannel, Page, RepoResult,
    Snowflake, TopicHistory,
};

use crate::models::{ChannelModel, ChannelStatsModel, DailyActivityModel, TopicHistoryModel};

use super::error::{expect_rows, map_db_error, map_unique_violation};
use super::member::insert_member;
use super::pin::insert_pin;
use super::settings::upsert_settings;

/// Build an ILIKE pattern matching `query` anywhere, with wildcards escaped
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, workspace_id, name, type, description, topic, icon_url, is_archived,
                   created_by, created_at, updated_at, deleted_at
            FROM channels
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn name_exists(&self, workspace_id: Snowflake, name: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM channels
                WHERE workspace_id = $1 AND name = $2 AND deleted_at IS NULL
            )
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, new), fields(channel_id = %new.channel.id, members = new.members.len(), pins = new.pins.len()))]
    async fn create(&self, new: &NewChannel) -> RepoResult<()> {
        let channel = &new.channel;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO channels (id, workspace_id, name, type, description, topic, icon_url,
                                  is_archived, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(channel.id.into_inner())
        .bind(channel.workspace_id.into_inner())
        .bind(&channel.name)
        .bind(channel.channel_type.as_str())
        .bind(&channel.description)
        .bind(&channel.topic)
        .bind(&channel.icon_url)
        .bind(channel.is_archived)
        .bind(channel.created_by.map(Snowflake::into_inner))
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ChannelNameTaken))?;

        insert_member(&mut *tx, &new.owner).await?;
        for member in &new.members {
            insert_member(&mut *tx, member).await?;
        }
        for pin in &new.pins {
            insert_pin(&mut *tx, pin).await?;
        }
        if let Some(settings) = &new.settings {
            upsert_settings(&mut *tx, settings).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, channel, topic_change), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel, topic_change: Option<&TopicHistory>) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE channels
            SET name = $2, description = $3, topic = $4, icon_url = $5, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(&channel.description)
        .bind(&channel.topic)
        .bind(&channel.icon_url)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ChannelNameTaken))?;

        expect_rows(result.rows_affected(), || DomainError::ChannelNotFound(channel.id))?;

        if let Some(entry) = topic_change {
            sqlx::query(
                r"
                INSERT INTO channel_topic_history (id, channel_id, old_topic, new_topic, changed_by, changed_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(entry.id.into_inner())
            .bind(entry.channel_id.into_inner())
            .bind(&entry.old_topic)
            .bind(&entry.new_topic)
            .bind(entry.changed_by.into_inner())
            .bind(entry.changed_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_archived(&self, id: Snowflake, archived: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels
            SET is_archived = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(archived)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ChannelNotFound(id))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ChannelNotFound(id))
    }

    #[instrument(skip(self))]
    async fn list_by_workspace(&self, workspace_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, workspace_id, name, type, description, topic, icon_url, is_archived,
                   created_by, created_at, updated_at, deleted_at
            FROM channels
            WHERE workspace_id = $1 AND deleted_at IS NULL
            ORDER BY name
            ",
        )
        .bind(workspace_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_member(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT c.id, c.workspace_id, c.name, c.type, c.description, c.topic, c.icon_url,
                   c.is_archived, c.created_by, c.created_at, c.updated_at, c.deleted_at
            FROM channels c
            JOIN channel_members m ON m.channel_id = c.id AND m.user_id = $2
            WHERE c.workspace_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.name
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, workspace_id: Snowflake, query: &str, limit: i64) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, workspace_id, name, type, description, topic, icon_url, is_archived,
                   created_by, created_at, updated_at, deleted_at
            FROM channels
            WHERE workspace_id = $1
              AND deleted_at IS NULL
              AND (name ILIKE $2 OR description ILIKE $2)
            ORDER BY name
            LIMIT $3
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn stats(&self, channel_id: Snowflake) -> RepoResult<ChannelStats> {
        let result = sqlx::query_as::<_, ChannelStatsModel>(
            r"
            SELECT
                (SELECT COUNT(*) FROM channel_members WHERE channel_id = $1) AS member_count,
                (SELECT COUNT(*) FROM channel_pins WHERE channel_id = $1) AS pin_count,
                (SELECT COUNT(*) FROM channel_members
                 WHERE channel_id = $1 AND last_read_at >= NOW() - INTERVAL '7 days') AS active_members_week
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn daily_activity(&self, channel_id: Snowflake, days: i64) -> RepoResult<Vec<DailyActivity>> {
        let results = sqlx::query_as::<_, DailyActivityModel>(
            r"
            SELECT DATE(last_read_at) AS date, COUNT(DISTINCT user_id) AS active_users
            FROM channel_members
            WHERE channel_id = $1
              AND last_read_at >= NOW() - make_interval(days => $2::INT)
            GROUP BY DATE(last_read_at)
            ORDER BY date
            ",
        )
        .bind(channel_id.into_inner())
        .bind(days)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DailyActivity::from).collect())
    }

    #[instrument(skip(self))]
    async fn topic_history(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<TopicHistory>> {
        let results = sqlx::query_as::<_, TopicHistoryModel>(
            r"
            SELECT id, channel_id, old_topic, new_topic, changed_by, changed_at
            FROM channel_topic_history
            WHERE channel_id = $1
            ORDER BY changed_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(channel_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TopicHistory::from).collect())
    }
}
