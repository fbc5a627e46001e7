//! Per-user channel relations - stars, follows, and read receipts
//!
//! None of these are gated by channel role except read receipts, which
//! require membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A channel starred by a user, ordered by `position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredChannel {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl StarredChannel {
    pub fn new(id: Snowflake, user_id: Snowflake, channel_id: Snowflake, position: i32) -> Self {
        Self {
            id,
            user_id,
            channel_id,
            position,
            created_at: Utc::now(),
        }
    }
}

/// A user following a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFollower {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub followed_at: DateTime<Utc>,
}

impl ChannelFollower {
    pub fn new(id: Snowflake, channel_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            followed_at: Utc::now(),
        }
    }
}

/// Read marker for one message, unique per (channel, user, message)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReceipt {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub message_id: Snowflake,
    pub read_at: DateTime<Utc>,
}

impl ReadReceipt {
    pub fn new(id: Snowflake, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            message_id,
            read_at: Utc::now(),
        }
    }
}
