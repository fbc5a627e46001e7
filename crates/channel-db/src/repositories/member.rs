//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use channel_core::{
    ChannelMember, DomainError, MemberRepository, MemberRole, NotificationLevel, RepoResult, Snowflake,
};

use crate::models::MemberModel;

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// Insert a membership row unless the user already belongs; true when a row was written
pub(super) async fn insert_member(conn: &mut PgConnection, member: &ChannelMember) -> RepoResult<bool> {
    let result = sqlx::query(
        r"
        INSERT INTO channel_members (id, channel_id, user_id, role, notifications, joined_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (channel_id, user_id) DO NOTHING
        ",
    )
    .bind(member.id.into_inner())
    .bind(member.channel_id.into_inner())
    .bind(member.user_id.into_inner())
    .bind(member.role.as_str())
    .bind(member.notifications.as_str())
    .bind(member.joined_at)
    .execute(conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected() > 0)
}

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ChannelMember>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, channel_id, user_id, role, notifications, joined_at, last_read_at
            FROM channel_members
            WHERE channel_id = $1 AND user_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelMember::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelMember>> {
        let results = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, channel_id, user_id, role, notifications, joined_at, last_read_at
            FROM channel_members
            WHERE channel_id = $1
            ORDER BY joined_at
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChannelMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, channel_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM channel_members WHERE channel_id = $1")
            .bind(channel_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(channel_id = %member.channel_id, user_id = %member.user_id))]
    async fn create(&self, member: &ChannelMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_members (id, channel_id, user_id, role, notifications, joined_at, last_read_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.channel_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.notifications.as_str())
        .bind(member.joined_at)
        .bind(member.last_read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self, members), fields(count = members.len()))]
    async fn create_many(&self, members: &[ChannelMember]) -> RepoResult<Vec<Snowflake>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut inserted = Vec::with_capacity(members.len());

        for member in members {
            if insert_member(&mut *tx, member).await? {
                inserted.push(member.user_id);
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn delete(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_members WHERE channel_id = $1 AND user_id = $2")
            .bind(channel_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::MemberNotFound)
    }

    #[instrument(skip(self))]
    async fn update_role(&self, channel_id: Snowflake, user_id: Snowflake, role: MemberRole) -> RepoResult<()> {
        let result = sqlx::query("UPDATE channel_members SET role = $3 WHERE channel_id = $1 AND user_id = $2")
            .bind(channel_id.into_inner())
            .bind(user_id.into_inner())
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::MemberNotFound)
    }

    #[instrument(skip(self))]
    async fn update_notifications(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        level: NotificationLevel,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE channel_members SET notifications = $3 WHERE channel_id = $1 AND user_id = $2",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .bind(level.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::MemberNotFound)
    }

    #[instrument(skip(self))]
    async fn update_last_read(&self, channel_id: Snowflake, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE channel_members SET last_read_at = $3 WHERE channel_id = $1 AND user_id = $2",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::MemberNotFound)
    }

    #[instrument(skip(self))]
    async fn transfer_ownership(&self, channel_id: Snowflake, from: Snowflake, to: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let promoted = sqlx::query(
            "UPDATE channel_members SET role = 'owner' WHERE channel_id = $1 AND user_id = $2",
        )
        .bind(channel_id.into_inner())
        .bind(to.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;
        expect_rows(promoted.rows_affected(), || DomainError::NotMember)?;

        let demoted = sqlx::query(
            "UPDATE channel_members SET role = 'admin' WHERE channel_id = $1 AND user_id = $2",
        )
        .bind(channel_id.into_inner())
        .bind(from.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;
        expect_rows(demoted.rows_affected(), || DomainError::MemberNotFound)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
