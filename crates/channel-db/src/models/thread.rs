//! Thread database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channel_threads table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadModel {
    pub id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub title: Option<String>,
    pub created_by: i64,
    pub is_locked: bool,
    pub is_resolved: bool,
    pub reply_count: i32,
    pub last_reply_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for thread_replies table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadReplyModel {
    pub id: i64,
    pub thread_id: i64,
    pub user_id: i64,
    pub content: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for thread_followers table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadFollowerModel {
    pub id: i64,
    pub thread_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
