//! PostgreSQL implementation of AnnouncementRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{Announcement, AnnouncementRepository, DomainError, RepoResult, Snowflake};

use crate::models::AnnouncementModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of AnnouncementRepository
#[derive(Clone)]
pub struct PgAnnouncementRepository {
    pool: PgPool,
}

impl PgAnnouncementRepository {
    /// Create a new PgAnnouncementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for PgAnnouncementRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Announcement>> {
        let result = sqlx::query_as::<_, AnnouncementModel>(
            r"
            SELECT id, channel_id, title, content, priority, author_id, is_pinned, expires_at,
                   created_at, updated_at
            FROM channel_announcements
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Announcement::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Announcement>> {
        let results = sqlx::query_as::<_, AnnouncementModel>(
            r"
            SELECT id, channel_id, title, content, priority, author_id, is_pinned, expires_at,
                   created_at, updated_at
            FROM channel_announcements
            WHERE channel_id = $1
            ORDER BY is_pinned DESC, created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Announcement::from).collect())
    }

    #[instrument(skip(self, announcement), fields(announcement_id = %announcement.id))]
    async fn create(&self, announcement: &Announcement) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_announcements (id, channel_id, title, content, priority, author_id,
                                               is_pinned, expires_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(announcement.id.into_inner())
        .bind(announcement.channel_id.into_inner())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.priority.as_str())
        .bind(announcement.author_id.into_inner())
        .bind(announcement.is_pinned)
        .bind(announcement.expires_at)
        .bind(announcement.created_at)
        .bind(announcement.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, announcement), fields(announcement_id = %announcement.id))]
    async fn update(&self, announcement: &Announcement) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_announcements
            SET title = $2, content = $3, priority = $4, is_pinned = $5, expires_at = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(announcement.id.into_inner())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.priority.as_str())
        .bind(announcement.is_pinned)
        .bind(announcement.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::AnnouncementNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_announcements WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::AnnouncementNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAnnouncementRepository>();
    }
}
