//! PostgreSQL implementation of SettingsRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use channel_core::{ChannelSettings, RepoResult, SettingsRepository, Snowflake};

use crate::models::SettingsModel;

use super::error::map_db_error;

/// Insert or replace a channel's settings row on an open connection
pub(super) async fn upsert_settings(conn: &mut PgConnection, settings: &ChannelSettings) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO channel_settings (channel_id, slow_mode_interval, max_pins, max_bookmarks,
                                      allow_threads, allow_reactions, allow_invites,
                                      auto_archive_days, default_notification, custom_emoji,
                                      link_previews, member_limit, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (channel_id) DO UPDATE
        SET slow_mode_interval = EXCLUDED.slow_mode_interval,
            max_pins = EXCLUDED.max_pins,
            max_bookmarks = EXCLUDED.max_bookmarks,
            allow_threads = EXCLUDED.allow_threads,
            allow_reactions = EXCLUDED.allow_reactions,
            allow_invites = EXCLUDED.allow_invites,
            auto_archive_days = EXCLUDED.auto_archive_days,
            default_notification = EXCLUDED.default_notification,
            custom_emoji = EXCLUDED.custom_emoji,
            link_previews = EXCLUDED.link_previews,
            member_limit = EXCLUDED.member_limit,
            updated_at = NOW()
        ",
    )
    .bind(settings.channel_id.into_inner())
    .bind(settings.slow_mode_interval)
    .bind(settings.max_pins)
    .bind(settings.max_bookmarks)
    .bind(settings.allow_threads)
    .bind(settings.allow_reactions)
    .bind(settings.allow_invites)
    .bind(settings.auto_archive_days)
    .bind(settings.default_notification.as_str())
    .bind(settings.custom_emoji)
    .bind(settings.link_previews)
    .bind(settings.member_limit)
    .bind(settings.created_at)
    .bind(settings.updated_at)
    .execute(conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// PostgreSQL implementation of SettingsRepository
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new PgSettingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn find(&self, channel_id: Snowflake) -> RepoResult<Option<ChannelSettings>> {
        let result = sqlx::query_as::<_, SettingsModel>(
            r"
            SELECT channel_id, slow_mode_interval, max_pins, max_bookmarks, allow_threads,
                   allow_reactions, allow_invites, auto_archive_days, default_notification,
                   custom_emoji, link_previews, member_limit, created_at, updated_at
            FROM channel_settings
            WHERE channel_id = $1
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelSettings::from))
    }

    #[instrument(skip(self, settings), fields(channel_id = %settings.channel_id))]
    async fn upsert(&self, settings: &ChannelSettings) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        upsert_settings(&mut *conn, settings).await
    }
}
