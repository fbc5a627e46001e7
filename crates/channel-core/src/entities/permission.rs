//! Permission override entity - per-channel allow/deny for a role or user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// What a permission override targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTarget {
    Role,
    User,
}

impl PermissionTarget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::User => "user",
        }
    }
}

impl From<&str> for PermissionTarget {
    fn from(value: &str) -> Self {
        match value {
            "user" => Self::User,
            _ => Self::Role,
        }
    }
}

/// Permission override, unique per (channel, permission_type, target_type, target_id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverride {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub permission_type: String,
    pub target_type: PermissionTarget,
    pub target_id: String,
    pub allow: bool,
    pub deny: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PermissionOverride {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        permission_type: String,
        target_type: PermissionTarget,
        target_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            permission_type,
            target_type,
            target_id,
            allow: false,
            deny: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the allow/deny pair
    pub fn with_flags(mut self, allow: bool, deny: bool) -> Self {
        self.allow = allow;
        self.deny = deny;
        self
    }
}
