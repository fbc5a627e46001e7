//! Voice presence - who is connected to a channel's voice room

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Voice session row; live while `disconnected_at` is unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceState {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub is_muted: bool,
    pub is_deafened: bool,
    pub is_screen_share: bool,
    pub is_video_on: bool,
    pub joined_at: DateTime<Utc>,
    pub disconnected_at: Option<DateTime<Utc>>,
}

impl VoiceState {
    pub fn new(id: Snowflake, channel_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            user_id,
            is_muted: false,
            is_deafened: false,
            is_screen_share: false,
            is_video_on: false,
            joined_at: Utc::now(),
            disconnected_at: None,
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.disconnected_at.is_none()
    }

    /// Apply only the flags that are present
    pub fn apply(&mut self, patch: &VoiceStatePatch) {
        if let Some(v) = patch.is_muted {
            self.is_muted = v;
        }
        if let Some(v) = patch.is_deafened {
            self.is_deafened = v;
        }
        if let Some(v) = patch.is_screen_share {
            self.is_screen_share = v;
        }
        if let Some(v) = patch.is_video_on {
            self.is_video_on = v;
        }
    }
}

/// Partial update of the four voice flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceStatePatch {
    pub is_muted: Option<bool>,
    pub is_deafened: Option<bool>,
    pub is_screen_share: Option<bool>,
    pub is_video_on: Option<bool>,
}

impl VoiceStatePatch {
    pub fn is_empty(&self) -> bool {
        self.is_muted.is_none()
            && self.is_deafened.is_none()
            && self.is_screen_share.is_none()
            && self.is_video_on.is_none()
    }
}
