//! PostgreSQL implementation of PermissionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{DomainError, PermissionOverride, PermissionRepository, RepoResult, Snowflake};

use crate::models::PermissionModel;

use super::error::{expect_rows, map_db_error};

/// PostgreSQL implementation of PermissionRepository
#[derive(Clone)]
pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    /// Create a new PgPermissionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<PermissionOverride>> {
        let result = sqlx::query_as::<_, PermissionModel>(
            r"
            SELECT id, channel_id, permission_type, target_type, target_id, allow, deny,
                   created_at, updated_at
            FROM channel_permissions
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PermissionOverride::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<PermissionOverride>> {
        let results = sqlx::query_as::<_, PermissionModel>(
            r"
            SELECT id, channel_id, permission_type, target_type, target_id, allow, deny,
                   created_at, updated_at
            FROM channel_permissions
            WHERE channel_id = $1
            ORDER BY permission_type, target_type, target_id
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PermissionOverride::from).collect())
    }

    #[instrument(skip(self, permission), fields(channel_id = %permission.channel_id))]
    async fn upsert(&self, permission: &PermissionOverride) -> RepoResult<PermissionOverride> {
        // On conflict the existing row keeps its id and created_at
        let stored = sqlx::query_as::<_, PermissionModel>(
            r"
            INSERT INTO channel_permissions (id, channel_id, permission_type, target_type, target_id,
                                             allow, deny, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (channel_id, permission_type, target_type, target_id) DO UPDATE
            SET allow = EXCLUDED.allow, deny = EXCLUDED.deny, updated_at = NOW()
            RETURNING id, channel_id, permission_type, target_type, target_id, allow, deny,
                      created_at, updated_at
            ",
        )
        .bind(permission.id.into_inner())
        .bind(permission.channel_id.into_inner())
        .bind(&permission.permission_type)
        .bind(permission.target_type.as_str())
        .bind(&permission.target_id)
        .bind(permission.allow)
        .bind(permission.deny)
        .bind(permission.created_at)
        .bind(permission.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stored.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channel_permissions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        expect_rows(result.rows_affected(), || DomainError::PermissionNotFound)
    }
}
