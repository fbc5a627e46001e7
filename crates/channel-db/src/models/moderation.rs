//! Ban, mute, and moderation log database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from channel_bans or channel_mutes
///
/// The two tables differ only in the actor column name (`banned_by` /
/// `muted_by`); queries alias it to `actor_id`.
#[derive(Debug, Clone, FromRow)]
pub struct RestrictionModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub actor_id: i64,
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Database model for channel_moderation_log table
#[derive(Debug, Clone, FromRow)]
pub struct ModerationLogModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub action: String,
    pub actor_id: i64,
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
