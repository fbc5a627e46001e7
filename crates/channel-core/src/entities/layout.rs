//! Channel layout entities - tabs and cross-channel links

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A tab shown in the channel header, ordered by `position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTab {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub name: String,
    pub tab_type: String,
    pub config: Option<serde_json::Value>,
    pub position: i32,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelTab {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        name: String,
        tab_type: String,
        position: i32,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            name,
            tab_type,
            config: None,
            position,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Kind of relation between two channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    #[default]
    Related,
    Parent,
    Mirror,
}

impl LinkType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Related => "related",
            Self::Parent => "parent",
            Self::Mirror => "mirror",
        }
    }
}

impl From<&str> for LinkType {
    fn from(value: &str) -> Self {
        match value {
            "parent" => Self::Parent,
            "mirror" => Self::Mirror,
            _ => Self::Related,
        }
    }
}

/// Directed link from a source channel to a target channel
///
/// Deleting a link only deactivates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLink {
    pub id: Snowflake,
    pub source_channel_id: Snowflake,
    pub target_channel_id: Snowflake,
    pub created_by: Snowflake,
    pub link_type: LinkType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelLink {
    pub fn new(
        id: Snowflake,
        source_channel_id: Snowflake,
        target_channel_id: Snowflake,
        link_type: LinkType,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            source_channel_id,
            target_channel_id,
            created_by,
            link_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the link touches `channel_id` on either side
    #[inline]
    pub fn involves(&self, channel_id: Snowflake) -> bool {
        self.source_channel_id == channel_id || self.target_channel_id == channel_id
    }
}
