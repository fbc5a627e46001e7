//! Reaction entity - an emoji reaction on a channel message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Reaction entity, unique per (channel, message, user, emoji)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: String,
    ) -> Self {
        Self {
            id,
            channel_id,
            message_id,
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }

    /// Check if reaction uses a specific emoji
    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}

/// Aggregated reaction count for a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub emoji: String,
    pub count: i64,
}

impl ReactionSummary {
    pub fn new(emoji: String, count: i64) -> Self {
        Self { emoji, count }
    }
}
