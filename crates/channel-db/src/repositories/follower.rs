//! PostgreSQL implementation of FollowerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ChannelFollower, DomainError, FollowerRepository, Page, RepoResult, Snowflake};

use crate::models::FollowerModel;

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of FollowerRepository
#[derive(Clone)]
pub struct PgFollowerRepository {
    pool: PgPool,
}

impl PgFollowerRepository {
    /// Create a new PgFollowerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowerRepository for PgFollowerRepository {
    #[instrument(skip(self))]
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ChannelFollower>> {
        let result = sqlx::query_as::<_, FollowerModel>(
            r"
            SELECT id, channel_id, user_id, followed_at
            FROM channel_followers
            WHERE channel_id = $1 AND user_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelFollower::from))
    }

    #[instrument(skip(self, follower), fields(channel_id = %follower.channel_id))]
    async fn create(&self, follower: &ChannelFollower) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_followers (id, channel_id, user_id, followed_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(follower.id.into_inner())
        .bind(follower.channel_id.into_inner())
        .bind(follower.user_id.into_inner())
        .bind(follower.followed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyFollowing))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_followers WHERE channel_id = $1 AND user_id = $2")
            .bind(channel_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::NotFollowing)
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<ChannelFollower>> {
        let results = sqlx::query_as::<_, FollowerModel>(
            r"
            SELECT id, channel_id, user_id, followed_at
            FROM channel_followers
            WHERE channel_id = $1
            ORDER BY followed_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(channel_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChannelFollower::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, channel_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM channel_followers WHERE channel_id = $1")
            .bind(channel_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT channel_id FROM channel_followers WHERE user_id = $1 ORDER BY followed_at DESC",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFollowerRepository>();
    }
}
