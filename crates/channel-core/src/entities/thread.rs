//! Thread entities - threads, replies, and followers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Thread anchored on a channel message
///
/// `reply_count` and `last_reply_at` are maintained alongside reply
/// creation and deletion rather than recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub title: Option<String>,
    pub created_by: Snowflake,
    pub is_locked: bool,
    pub is_resolved: bool,
    pub reply_count: i32,
    pub last_reply_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        title: Option<String>,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            message_id,
            title,
            created_by,
            is_locked: false,
            is_resolved: false,
            reply_count: 0,
            last_reply_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn accepts_replies(&self) -> bool {
        !self.is_locked
    }

    #[inline]
    pub fn is_created_by(&self, user_id: Snowflake) -> bool {
        self.created_by == user_id
    }
}

/// Reply within a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReply {
    pub id: Snowflake,
    pub thread_id: Snowflake,
    pub user_id: Snowflake,
    pub content: String,
    pub parent_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ThreadReply {
    pub fn new(
        id: Snowflake,
        thread_id: Snowflake,
        user_id: Snowflake,
        content: String,
        parent_id: Option<Snowflake>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            thread_id,
            user_id,
            content,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Replace reply content
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// Subscription of a user to a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadFollower {
    pub id: Snowflake,
    pub thread_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl ThreadFollower {
    pub fn new(id: Snowflake, thread_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            thread_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
