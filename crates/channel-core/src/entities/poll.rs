//! Poll entities - polls, options, votes, and tallied results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Minimum options on a poll
pub const MIN_POLL_OPTIONS: usize = 2;
/// Maximum options on a poll
pub const MAX_POLL_OPTIONS: usize = 10;

/// Poll entity. Closing is one-way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub created_by: Snowflake,
    pub question: String,
    pub is_anonymous: bool,
    pub multi_choice: bool,
    pub is_closed: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Poll {
    pub fn new(id: Snowflake, channel_id: Snowflake, created_by: Snowflake, question: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            created_by,
            question,
            is_anonymous: false,
            multi_choice: false,
            is_closed: false,
            expires_at: None,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether votes are still accepted at `now`
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_closed && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }

    #[inline]
    pub fn is_created_by(&self, user_id: Snowflake) -> bool {
        self.created_by == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: Snowflake,
    pub poll_id: Snowflake,
    pub text: String,
    pub position: i32,
}

impl PollOption {
    pub fn new(id: Snowflake, poll_id: Snowflake, text: String, position: i32) -> Self {
        Self {
            id,
            poll_id,
            text,
            position,
        }
    }
}

/// One vote, unique per (poll, option, user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollVote {
    pub id: Snowflake,
    pub poll_id: Snowflake,
    pub option_id: Snowflake,
    pub user_id: Snowflake,
    pub voted_at: DateTime<Utc>,
}

impl PollVote {
    pub fn new(id: Snowflake, poll_id: Snowflake, option_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            poll_id,
            option_id,
            user_id,
            voted_at: Utc::now(),
        }
    }
}

/// Vote count for one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResult {
    pub option_id: Snowflake,
    pub option_text: String,
    pub vote_count: i64,
}
