//! Bookmark entity - a user's saved link within a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Maximum bookmarks a user may keep in one channel
pub const MAX_BOOKMARKS_PER_USER: i64 = 100;

/// Bookmark entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub url: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        user_id: Snowflake,
        title: String,
        position: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            user_id,
            title,
            url: None,
            entity_type: None,
            entity_id: None,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `user_id` created this bookmark
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}
