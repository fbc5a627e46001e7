//! PostgreSQL implementation of BookmarkRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{Bookmark, BookmarkRepository, DomainError, RepoResult, Snowflake};

use crate::models::BookmarkModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of BookmarkRepository
#[derive(Clone)]
pub struct PgBookmarkRepository {
    pool: PgPool,
}

impl PgBookmarkRepository {
    /// Create a new PgBookmarkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Bookmark>> {
        let result = sqlx::query_as::<_, BookmarkModel>(
            r"
            SELECT id, channel_id, user_id, title, url, entity_type, entity_id, position,
                   created_at, updated_at
            FROM channel_bookmarks
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Bookmark::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Bookmark>> {
        let results = sqlx::query_as::<_, BookmarkModel>(
            r"
            SELECT id, channel_id, user_id, title, url, entity_type, entity_id, position,
                   created_at, updated_at
            FROM channel_bookmarks
            WHERE channel_id = $1 AND user_id = $2
            ORDER BY position
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Bookmark::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM channel_bookmarks WHERE channel_id = $1 AND user_id = $2",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn next_position(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r"
            SELECT COALESCE(MAX(position) + 1, 0)
            FROM channel_bookmarks
            WHERE channel_id = $1 AND user_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, bookmark), fields(channel_id = %bookmark.channel_id))]
    async fn create(&self, bookmark: &Bookmark) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_bookmarks (id, channel_id, user_id, title, url, entity_type, entity_id,
                                           position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(bookmark.id.into_inner())
        .bind(bookmark.channel_id.into_inner())
        .bind(bookmark.user_id.into_inner())
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.entity_type)
        .bind(&bookmark.entity_id)
        .bind(bookmark.position)
        .bind(bookmark.created_at)
        .bind(bookmark.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, bookmark), fields(bookmark_id = %bookmark.id))]
    async fn update(&self, bookmark: &Bookmark) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_bookmarks
            SET title = $2, url = $3, entity_type = $4, entity_id = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(bookmark.id.into_inner())
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.entity_type)
        .bind(&bookmark.entity_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::BookmarkNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_bookmarks WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::BookmarkNotFound)
    }
}
