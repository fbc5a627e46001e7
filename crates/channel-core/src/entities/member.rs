//! Member entity - a user's participation in a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Governance role within a channel
///
/// Ordered by privilege: `Member < Admin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
    Owner,
}

impl MemberRole {
    /// Get the stored string value
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Owner or admin
    #[inline]
    #[must_use]
    pub fn is_moderator(self) -> bool {
        self >= Self::Admin
    }

    #[inline]
    #[must_use]
    pub fn is_owner(self) -> bool {
        self == Self::Owner
    }
}

impl From<&str> for MemberRole {
    fn from(value: &str) -> Self {
        match value {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            _ => Self::Member,
        }
    }
}

/// Notification preference for a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    #[default]
    All,
    Mentions,
    None,
}

impl NotificationLevel {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mentions => "mentions",
            Self::None => "none",
        }
    }
}

impl From<&str> for NotificationLevel {
    fn from(value: &str) -> Self {
        match value {
            "mentions" => Self::Mentions,
            "none" => Self::None,
            _ => Self::All,
        }
    }
}

/// Channel member entity (junction between user and channel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMember {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MemberRole,
    pub notifications: NotificationLevel,
    pub joined_at: DateTime<Utc>,
    pub last_read_at: Option<DateTime<Utc>>,
}

impl ChannelMember {
    /// Create a new member with default notifications
    #[must_use]
    pub fn new(id: Snowflake, channel_id: Snowflake, user_id: Snowflake, role: MemberRole) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            role,
            notifications: NotificationLevel::All,
            joined_at: Utc::now(),
            last_read_at: None,
        }
    }

    /// Carry over a notification preference
    #[must_use]
    pub fn with_notifications(mut self, notifications: NotificationLevel) -> Self {
        self.notifications = notifications;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role.is_owner()
    }

    #[inline]
    #[must_use]
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}
