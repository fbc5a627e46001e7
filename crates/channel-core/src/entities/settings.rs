//! Channel settings - one row per channel, defaults when absent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member::NotificationLevel;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub channel_id: Snowflake,
    /// Seconds between messages per user, 0 disables
    pub slow_mode_interval: i32,
    pub max_pins: i32,
    pub max_bookmarks: i32,
    pub allow_threads: bool,
    pub allow_reactions: bool,
    pub allow_invites: bool,
    /// 0 disables auto-archive
    pub auto_archive_days: i32,
    pub default_notification: NotificationLevel,
    pub custom_emoji: bool,
    pub link_previews: bool,
    /// 0 means unlimited
    pub member_limit: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelSettings {
    /// Settings a channel has before anyone saves them
    pub fn defaults(channel_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            channel_id,
            slow_mode_interval: 0,
            max_pins: 50,
            max_bookmarks: 100,
            allow_threads: true,
            allow_reactions: true,
            allow_invites: true,
            auto_archive_days: 0,
            default_notification: NotificationLevel::All,
            custom_emoji: false,
            link_previews: true,
            member_limit: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy every toggle onto another channel
    pub fn copy_for(&self, channel_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            channel_id,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}
