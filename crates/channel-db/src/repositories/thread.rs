//! PostgreSQL implementation of ThreadRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{
    DomainError, Page, RepoResult, Snowflake, Thread, ThreadFollower, ThreadReply, ThreadRepository,
};

use crate::models::{ThreadFollowerModel, ThreadModel, ThreadReplyModel};

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ThreadRepository
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    /// Create a new PgThreadRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Thread>> {
        let result = sqlx::query_as::<_, ThreadModel>(
            r"
            SELECT id, channel_id, message_id, title, created_by, is_locked, is_resolved,
                   reply_count, last_reply_at, created_at, updated_at
            FROM channel_threads
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Thread::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<Thread>> {
        let results = sqlx::query_as::<_, ThreadModel>(
            r"
            SELECT id, channel_id, message_id, title, created_by, is_locked, is_resolved,
                   reply_count, last_reply_at, created_at, updated_at
            FROM channel_threads
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

        Ok(results.into_iter().map(Thread::from).collect())
    }

    #[instrument(skip(self, thread, follower), fields(thread_id = %thread.id))]
    async fn create(&self, thread: &Thread, follower: &ThreadFollower) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO channel_threads (id, channel_id, message_id, title, created_by, is_locked,
                                         is_resolved, reply_count, last_reply_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(thread.id.into_inner())
        .bind(thread.channel_id.into_inner())
        .bind(thread.message_id.into_inner())
        .bind(&thread.title)
        .bind(thread.created_by.into_inner())
        .bind(thread.is_locked)
        .bind(thread.is_resolved)
        .bind(thread.reply_count)
        .bind(thread.last_reply_at)
        .bind(thread.created_at)
        .bind(thread.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO thread_followers (id, thread_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(follower.id.into_inner())
        .bind(follower.thread_id.into_inner())
        .bind(follower.user_id.into_inner())
        .bind(follower.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, thread), fields(thread_id = %thread.id))]
    async fn update(&self, thread: &Thread) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_threads
            SET title = $2, is_locked = $3, is_resolved = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(thread.id.into_inner())
        .bind(&thread.title)
        .bind(thread.is_locked)
        .bind(thread.is_resolved)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ThreadNotFound(thread.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_threads WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ThreadNotFound(id))
    }

    #[instrument(skip(self))]
    async fn find_reply(&self, id: Snowflake) -> RepoResult<Option<ThreadReply>> {
        let result = sqlx::query_as::<_, ThreadReplyModel>(
            r"
            SELECT id, thread_id, user_id, content, parent_id, created_at, updated_at
            FROM thread_replies
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ThreadReply::from))
    }

    #[instrument(skip(self))]
    async fn list_replies(&self, thread_id: Snowflake, page: Page) -> RepoResult<Vec<ThreadReply>> {
        let results = sqlx::query_as::<_, ThreadReplyModel>(
            r"
            SELECT id, thread_id, user_id, content, parent_id, created_at, updated_at
            FROM thread_replies
            WHERE thread_id = $1
            ORDER BY created_at
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(thread_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ThreadReply::from).collect())
    }

    #[instrument(skip(self, reply), fields(thread_id = %reply.thread_id))]
    async fn create_reply(&self, reply: &ThreadReply) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO thread_replies (id, thread_id, user_id, content, parent_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(reply.id.into_inner())
        .bind(reply.thread_id.into_inner())
        .bind(reply.user_id.into_inner())
        .bind(&reply.content)
        .bind(reply.parent_id.map(Snowflake::into_inner))
        .bind(reply.created_at)
        .bind(reply.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE channel_threads
            SET reply_count = reply_count + 1, last_reply_at = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(reply.thread_id.into_inner())
        .bind(reply.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;
        expect_rows(result.rows_affected(), || DomainError::ThreadNotFound(reply.thread_id))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, reply), fields(reply_id = %reply.id))]
    async fn update_reply(&self, reply: &ThreadReply) -> RepoResult<()> {
        let result = sqlx::query("UPDATE thread_replies SET content = $2, updated_at = NOW() WHERE id = $1")
            .bind(reply.id.into_inner())
            .bind(&reply.content)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::ReplyNotFound)
    }

    #[instrument(skip(self))]
    async fn delete_reply(&self, thread_id: Snowflake, reply_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM thread_replies WHERE id = $1 AND thread_id = $2")
            .bind(reply_id.into_inner())
            .bind(thread_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        expect_rows(result.rows_affected(), || DomainError::ReplyNotFound)?;

        sqlx::query(
            r"
            UPDATE channel_threads
            SET reply_count = GREATEST(reply_count - 1, 0), updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(thread_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_follower(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ThreadFollower>> {
        let result = sqlx::query_as::<_, ThreadFollowerModel>(
            r"
            SELECT id, thread_id, user_id, created_at
            FROM thread_followers
            WHERE thread_id = $1 AND user_id = $2
            ",
        )
        .bind(thread_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ThreadFollower::from))
    }

    #[instrument(skip(self, follower), fields(thread_id = %follower.thread_id))]
    async fn add_follower(&self, follower: &ThreadFollower) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO thread_followers (id, thread_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(follower.id.into_inner())
        .bind(follower.thread_id.into_inner())
        .bind(follower.user_id.into_inner())
        .bind(follower.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyFollowingThread))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_follower(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM thread_followers WHERE thread_id = $1 AND user_id = $2")
            .bind(thread_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::NotFollowing)
    }
}
