//! PostgreSQL implementation of InviteRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ChannelMember, DomainError, Invite, InviteRepository, RepoResult, Snowflake};

use crate::models::InviteModel;

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of InviteRepository
#[derive(Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    /// Create a new PgInviteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invite>> {
        let result = sqlx::query_as::<_, InviteModel>(
            r"
            SELECT id, channel_id, created_by, code, max_uses, use_count, expires_at, is_active, created_at
            FROM channel_invites
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invite::from))
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Invite>> {
        let result = sqlx::query_as::<_, InviteModel>(
            r"
            SELECT id, channel_id, created_by, code, max_uses, use_count, expires_at, is_active, created_at
            FROM channel_invites
            WHERE code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invite::from))
    }

    #[instrument(skip(self))]
    async fn code_exists(&self, code: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM channel_invites WHERE code = $1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Invite>> {
        let results = sqlx::query_as::<_, InviteModel>(
            r"
            SELECT id, channel_id, created_by, code, max_uses, use_count, expires_at, is_active, created_at
            FROM channel_invites
            WHERE channel_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Invite::from).collect())
    }

    #[instrument(skip(self, invite), fields(channel_id = %invite.channel_id))]
    async fn create(&self, invite: &Invite) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_invites (id, channel_id, created_by, code, max_uses, use_count,
                                         expires_at, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(invite.id.into_inner())
        .bind(invite.channel_id.into_inner())
        .bind(invite.created_by.into_inner())
        .bind(&invite.code)
        .bind(invite.max_uses)
        .bind(invite.use_count)
        .bind(invite.expires_at)
        .bind(invite.is_active)
        .bind(invite.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InviteCodeExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE channel_invites SET is_active = FALSE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::InviteNotFound)
    }

    #[instrument(skip(self, member), fields(user_id = %member.user_id))]
    async fn redeem(&self, invite_id: Snowflake, member: &ChannelMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO channel_members (id, channel_id, user_id, role, notifications, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.channel_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.notifications.as_str())
        .bind(member.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        // Guarded increment: a concurrent redeemer that took the last use loses here
        let result = sqlx::query(
            r"
            UPDATE channel_invites
            SET use_count = use_count + 1
            WHERE id = $1 AND is_active = TRUE AND (max_uses = 0 OR use_count < max_uses)
            ",
        )
        .bind(invite_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;
        expect_rows(result.rows_affected(), || DomainError::InviteMaxUses)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE channel_invites
            SET is_active = FALSE
            WHERE is_active = TRUE AND expires_at IS NOT NULL AND expires_at < $1
            ",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
