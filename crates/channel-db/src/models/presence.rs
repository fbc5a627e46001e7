//! Per-user relation database models - scheduled messages, voice state,
//! followers, starred channels, read receipts

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for scheduled_messages table
#[derive(Debug, Clone, FromRow)]
pub struct ScheduledMessageModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub content: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub thread_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for voice_channel_states table
#[derive(Debug, Clone, FromRow)]
pub struct VoiceStateModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub is_muted: bool,
    pub is_deafened: bool,
    pub is_screen_share: bool,
    pub is_video_on: bool,
    pub joined_at: DateTime<Utc>,
    pub disconnected_at: Option<DateTime<Utc>>,
}

/// Database model for channel_followers table
#[derive(Debug, Clone, FromRow)]
pub struct FollowerModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub followed_at: DateTime<Utc>,
}

/// Database model for starred_channels table
#[derive(Debug, Clone, FromRow)]
pub struct StarredModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Database model for channel_read_receipts table
#[derive(Debug, Clone, FromRow)]
pub struct ReadReceiptModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub message_id: i64,
    pub read_at: DateTime<Utc>,
}
