//! Moderation entities - bans, mutes, and the moderation log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Ban or mute restriction on a (channel, user) pair
///
/// A restriction with no `expires_at` is permanent. Expired restrictions stay in
/// the store but are no longer enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    /// `banned_by` or `muted_by`
    pub actor_id: Snowflake,
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Channel ban
pub type Ban = Restriction;

/// Channel mute
pub type Mute = Restriction;

impl Restriction {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        user_id: Snowflake,
        actor_id: Snowflake,
        reason: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            actor_id,
            reason,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Check if the restriction applies at `now`
    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }

    /// Check if the restriction currently applies
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }
}

/// Moderation action recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Ban,
    Unban,
    Mute,
    Unmute,
}

impl ModerationAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Unban => "unban",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
        }
    }
}

impl From<&str> for ModerationAction {
    fn from(value: &str) -> Self {
        match value {
            "unban" => Self::Unban,
            "mute" => Self::Mute,
            "unmute" => Self::Unmute,
            _ => Self::Ban,
        }
    }
}

/// Immutable moderation log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationEntry {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub action: ModerationAction,
    pub actor_id: Snowflake,
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ModerationEntry {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        user_id: Snowflake,
        action: ModerationAction,
        actor_id: Snowflake,
    ) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            action,
            actor_id,
            reason: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Copy reason and expiry from the restriction being logged
    pub fn with_details(mut self, reason: Option<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        self.reason = reason;
        self.expires_at = expires_at;
        self
    }
}
