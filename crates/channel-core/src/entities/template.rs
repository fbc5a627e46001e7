//! Channel template - a reusable channel archetype

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::ChannelType;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTemplate {
    pub id: Snowflake,
    pub workspace_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub topic: Option<String>,
    /// Settings snapshot applied to channels created from this template
    pub settings: Option<serde_json::Value>,
    pub use_count: i32,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelTemplate {
    pub fn new(
        id: Snowflake,
        workspace_id: Snowflake,
        name: String,
        channel_type: ChannelType,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            workspace_id,
            name,
            description: None,
            channel_type,
            topic: None,
            settings: None,
            use_count: 0,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_created_by(&self, user_id: Snowflake) -> bool {
        self.created_by == user_id
    }
}
