//! Channel entity - a workspace-scoped conversation space

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Visible to everyone in the workspace
    #[default]
    Public,
    /// Invite or add only
    Private,
    /// Direct message between two users
    Dm,
    /// Direct message between several users
    GroupDm,
}

impl ChannelType {
    /// Get the stored string value
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Dm => "dm",
            Self::GroupDm => "group_dm",
        }
    }
}

impl From<&str> for ChannelType {
    fn from(value: &str) -> Self {
        match value {
            "private" => Self::Private,
            "dm" => Self::Dm,
            "group_dm" => Self::GroupDm,
            _ => Self::Public, // Default for "public" and unknown values
        }
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    pub workspace_id: Snowflake,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub icon_url: Option<String>,
    pub is_archived: bool,
    pub created_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Channel {
    /// Create a new active channel
    #[must_use]
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
            channel_type,
            description: None,
            topic: None,
            icon_url: None,
            is_archived: false,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Check if the channel was soft-deleted
    #[inline]
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if new members can be added
    #[inline]
    #[must_use]
    pub fn accepts_new_members(&self) -> bool {
        !self.is_archived && !self.is_deleted()
    }

    /// Check if this is a direct message channel
    #[inline]
    #[must_use]
    pub fn is_dm(&self) -> bool {
        matches!(self.channel_type, ChannelType::Dm | ChannelType::GroupDm)
    }

    /// Replace the topic, returning the previous one
    pub fn set_topic(&mut self, topic: Option<String>) -> Option<String> {
        self.updated_at = Utc::now();
        std::mem::replace(&mut self.topic, topic)
    }

    /// Update channel name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// Append-only record of a topic change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicHistory {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub old_topic: Option<String>,
    pub new_topic: Option<String>,
    pub changed_by: Snowflake,
    pub changed_at: DateTime<Utc>,
}

impl TopicHistory {
    #[must_use]
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        old_topic: Option<String>,
        new_topic: Option<String>,
        changed_by: Snowflake,
    ) -> Self {
        Self {
            id,
            channel_id,
            old_topic,
            new_topic,
            changed_by,
            changed_at: Utc::now(),
        }
    }
}

/// Aggregate counters for a channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub member_count: i64,
    pub pin_count: i64,
    pub active_members_week: i64,
}

/// Per-day activity derived from member read markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: chrono::NaiveDate,
    pub active_users: i64,
}
