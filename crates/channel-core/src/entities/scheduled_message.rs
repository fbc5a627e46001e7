//! Scheduled message entity
//!
//! Delivery happens outside this service: a worker polls for pending rows
//! due before `now` and moves them to `sent` or `failed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Delivery status. Every state except `Pending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledStatus {
    #[default]
    Pending,
    Sent,
    Cancelled,
    Failed,
}

impl ScheduledStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Pending
    }
}

impl From<&str> for ScheduledStatus {
    fn from(value: &str) -> Self {
        match value {
            "sent" => Self::Sent,
            "cancelled" => Self::Cancelled,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub content: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: ScheduledStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub thread_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduledMessage {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        user_id: Snowflake,
        content: String,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            user_id,
            content,
            scheduled_at,
            status: ScheduledStatus::Pending,
            sent_at: None,
            thread_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ScheduledStatus::Pending
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}
