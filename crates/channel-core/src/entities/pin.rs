//! Pin entity - a message pinned to a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Pinned message, unique per (channel, message)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub pinned_by: Snowflake,
    pub pinned_at: DateTime<Utc>,
}

impl Pin {
    pub fn new(id: Snowflake, channel_id: Snowflake, message_id: Snowflake, pinned_by: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            message_id,
            pinned_by,
            pinned_at: Utc::now(),
        }
    }
}
