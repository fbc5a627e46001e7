//! Activity log entry - append-only channel audit record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Actions written to the activity log
pub mod actions {
    pub const CHANNEL_CREATED: &str = "channel_created";
    pub const CHANNEL_ARCHIVED: &str = "channel_archived";
    pub const CHANNEL_UNARCHIVED: &str = "channel_unarchived";
    pub const OWNERSHIP_TRANSFERRED: &str = "ownership_transferred";
    pub const SETTINGS_UPDATED: &str = "settings_updated";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub action: String,
    pub target_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    pub fn new(id: Snowflake, channel_id: Snowflake, user_id: Snowflake, action: &str) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            action: action.to_string(),
            target_id: None,
            details: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_target(mut self, target_id: impl ToString) -> Self {
        self.target_id = Some(target_id.to_string());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
