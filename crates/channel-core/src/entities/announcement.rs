//! Announcement entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Announcement priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl AnnouncementPriority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl From<&str> for AnnouncementPriority {
    fn from(value: &str) -> Self {
        match value {
            "low" => Self::Low,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub title: String,
    pub content: String,
    pub priority: AnnouncementPriority,
    pub author_id: Snowflake,
    pub is_pinned: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        title: String,
        content: String,
        priority: AnnouncementPriority,
        author_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            title,
            content,
            priority,
            author_id,
            is_pinned: false,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= Utc::now())
    }
}
