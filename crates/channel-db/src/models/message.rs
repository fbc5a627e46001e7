//! Message-attached database models - reactions, pins, bookmarks

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channel_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

/// Reaction count aggregated by emoji
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub emoji: String,
    pub count: i64,
}

/// Database model for channel_pins table
#[derive(Debug, Clone, FromRow)]
pub struct PinModel {
    pub id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub pinned_by: i64,
    pub pinned_at: DateTime<Utc>,
}

/// Database model for channel_bookmarks table
#[derive(Debug, Clone, FromRow)]
pub struct BookmarkModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub title: String,
    pub url: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
