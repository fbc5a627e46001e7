//! PostgreSQL implementation of ReadReceiptRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{ReadReceipt, ReadReceiptRepository, RepoResult, Snowflake};

use crate::models::ReadReceiptModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReadReceiptRepository
#[derive(Clone)]
pub struct PgReadReceiptRepository {
    pool: PgPool,
}

impl PgReadReceiptRepository {
    /// Create a new PgReadReceiptRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadReceiptRepository for PgReadReceiptRepository {
    #[instrument(skip(self, receipt), fields(message_id = %receipt.message_id))]
    async fn upsert(&self, receipt: &ReadReceipt) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channel_read_receipts (id, channel_id, user_id, message_id, read_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (channel_id, user_id, message_id) DO UPDATE
            SET read_at = EXCLUDED.read_at
            ",
        )
        .bind(receipt.id.into_inner())
        .bind(receipt.channel_id.into_inner())
        .bind(receipt.user_id.into_inner())
        .bind(receipt.message_id.into_inner())
        .bind(receipt.read_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<ReadReceipt>> {
        let results = sqlx::query_as::<_, ReadReceiptModel>(
            r"
            SELECT id, channel_id, user_id, message_id, read_at
            FROM channel_read_receipts
            WHERE channel_id = $1 AND message_id = $2
            ORDER BY read_at
            ",
        )
        .bind(channel_id.into_inner())
        .bind(message_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReadReceipt::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM channel_read_receipts WHERE channel_id = $1 AND message_id = $2",
        )
        .bind(channel_id.into_inner())
        .bind(message_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
