//! PostgreSQL implementation of ModerationRepository
//!
//! Bans and mutes live in separate tables with identical shape. Every write
//! appends to `channel_moderation_log` inside the same transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use channel_core::{Ban, DomainError, ModerationEntry, ModerationRepository, Mute, Page, RepoResult, Snowflake};

use crate::models::{ModerationLogModel, RestrictionModel};

use super::error::{expect_rows, map_db_error};

/// Append one moderation log row on an open connection
async fn insert_log(conn: &mut PgConnection, log: &ModerationEntry) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO channel_moderation_log (id, channel_id, user_id, action, actor_id, reason, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ",
    )
    .bind(log.id.into_inner())
    .bind(log.channel_id.into_inner())
    .bind(log.user_id.into_inner())
    .bind(log.action.as_str())
    .bind(log.actor_id.into_inner())
    .bind(&log.reason)
    .bind(log.expires_at)
    .bind(log.created_at)
    .execute(conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// PostgreSQL implementation of ModerationRepository
#[derive(Clone)]
pub struct PgModerationRepository {
    pool: PgPool,
}

impl PgModerationRepository {
    /// Create a new PgModerationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModerationRepository for PgModerationRepository {
    #[instrument(skip(self))]
    async fn find_ban(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Ban>> {
        let result = sqlx::query_as::<_, RestrictionModel>(
            r"
            SELECT id, channel_id, user_id, banned_by AS actor_id, reason, expires_at, created_at
            FROM channel_bans
            WHERE channel_id = $1 AND user_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Ban::from))
    }

    #[instrument(skip(self))]
    async fn find_mute(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Mute>> {
        let result = sqlx::query_as::<_, RestrictionModel>(
            r"
            SELECT id, channel_id, user_id, muted_by AS actor_id, reason, expires_at, created_at
            FROM channel_mutes
            WHERE channel_id = $1 AND user_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Mute::from))
    }

    #[instrument(skip(self))]
    async fn is_banned(&self, channel_id: Snowflake, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM channel_bans
                WHERE channel_id = $1 AND user_id = $2 AND (expires_at IS NULL OR expires_at > $3)
            )
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn is_muted(&self, channel_id: Snowflake, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM channel_mutes
                WHERE channel_id = $1 AND user_id = $2 AND (expires_at IS NULL OR expires_at > $3)
            )
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, ban, log), fields(channel_id = %ban.channel_id, user_id = %ban.user_id))]
    async fn ban(&self, ban: &Ban, log: &ModerationEntry) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO channel_bans (id, channel_id, user_id, banned_by, reason, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (channel_id, user_id) DO UPDATE
            SET banned_by = EXCLUDED.banned_by,
                reason = EXCLUDED.reason,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            ",
        )
        .bind(ban.id.into_inner())
        .bind(ban.channel_id.into_inner())
        .bind(ban.user_id.into_inner())
        .bind(ban.actor_id.into_inner())
        .bind(&ban.reason)
        .bind(ban.expires_at)
        .bind(ban.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("DELETE FROM channel_members WHERE channel_id = $1 AND user_id = $2")
            .bind(ban.channel_id.into_inner())
            .bind(ban.user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, log))]
    async fn unban(&self, channel_id: Snowflake, user_id: Snowflake, log: &ModerationEntry) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM channel_bans WHERE channel_id = $1 AND user_id = $2")
            .bind(channel_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        expect_rows(result.rows_affected(), || DomainError::BanNotFound)?;

        insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, mute, log), fields(channel_id = %mute.channel_id, user_id = %mute.user_id))]
    async fn mute(&self, mute: &Mute, log: &ModerationEntry) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO channel_mutes (id, channel_id, user_id, muted_by, reason, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (channel_id, user_id) DO UPDATE
            SET muted_by = EXCLUDED.muted_by,
                reason = EXCLUDED.reason,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            ",
        )
        .bind(mute.id.into_inner())
        .bind(mute.channel_id.into_inner())
        .bind(mute.user_id.into_inner())
        .bind(mute.actor_id.into_inner())
        .bind(&mute.reason)
        .bind(mute.expires_at)
        .bind(mute.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, log))]
    async fn unmute(&self, channel_id: Snowflake, user_id: Snowflake, log: &ModerationEntry) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM channel_mutes WHERE channel_id = $1 AND user_id = $2")
            .bind(channel_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        expect_rows(result.rows_affected(), || DomainError::MuteNotFound)?;

        insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_bans(&self, channel_id: Snowflake) -> RepoResult<Vec<Ban>> {
        let results = sqlx::query_as::<_, RestrictionModel>(
            r"
            SELECT id, channel_id, user_id, banned_by AS actor_id, reason, expires_at, created_at
            FROM channel_bans
            WHERE channel_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Ban::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_mutes(&self, channel_id: Snowflake) -> RepoResult<Vec<Mute>> {
        let results = sqlx::query_as::<_, RestrictionModel>(
            r"
            SELECT id, channel_id, user_id, muted_by AS actor_id, reason, expires_at, created_at
            FROM channel_mutes
            WHERE channel_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Mute::from).collect())
    }

    #[instrument(skip(self))]
    async fn history(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<ModerationEntry>> {
        let results = sqlx::query_as::<_, ModerationLogModel>(
            r"
            SELECT id, channel_id, user_id, action, actor_id, reason, expires_at, created_at
            FROM channel_moderation_log
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

        Ok(results.into_iter().map(ModerationEntry::from).collect())
    }
}
