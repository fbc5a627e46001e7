//! PostgreSQL implementation of PinRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use channel_core::{DomainError, Pin, PinRepository, RepoResult, Snowflake};

use crate::models::PinModel;

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// Insert one pin on an open connection
pub(super) async fn insert_pin(conn: &mut PgConnection, pin: &Pin) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO channel_pins (id, channel_id, message_id, pinned_by, pinned_at)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(pin.id.into_inner())
    .bind(pin.channel_id.into_inner())
    .bind(pin.message_id.into_inner())
    .bind(pin.pinned_by.into_inner())
    .bind(pin.pinned_at)
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::AlreadyPinned))?;

    Ok(())
}

/// PostgreSQL implementation of PinRepository
#[derive(Clone)]
pub struct PgPinRepository {
    pool: PgPool,
}

impl PgPinRepository {
    /// Create a new PgPinRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PinRepository for PgPinRepository {
    #[instrument(skip(self))]
    async fn find(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Option<Pin>> {
        let result = sqlx::query_as::<_, PinModel>(
            r"
            SELECT id, channel_id, message_id, pinned_by, pinned_at
            FROM channel_pins
            WHERE channel_id = $1 AND message_id = $2
            ",
        )
        .bind(channel_id.into_inner())
        .bind(message_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Pin::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Pin>> {
        let results = sqlx::query_as::<_, PinModel>(
            r"
            SELECT id, channel_id, message_id, pinned_by, pinned_at
            FROM channel_pins
            WHERE channel_id = $1
            ORDER BY pinned_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Pin::from).collect())
    }

    #[instrument(skip(self, pin), fields(message_id = %pin.message_id))]
    async fn create(&self, pin: &Pin) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert_pin(&mut *conn, pin).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_pins WHERE channel_id = $1 AND message_id = $2")
            .bind(channel_id.into_inner())
            .bind(message_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::PinNotFound)
    }
}
