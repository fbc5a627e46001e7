//! Integration and governance database models - webhooks, permission
//! overrides, settings, announcements, and the activity log

use std::collections::BTreeSet;

use channel_core::WebhookEvent;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for channel_webhooks table
#[derive(Debug, Clone, FromRow)]
pub struct WebhookModel {
    pub id: i64,
    pub channel_id: i64,
    pub name: String,
    pub url: String,
    pub avatar_url: Option<String>,
    pub events: Json<BTreeSet<WebhookEvent>>,
    pub is_active: bool,
    pub created_by: i64,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_permissions table
#[derive(Debug, Clone, FromRow)]
pub struct PermissionModel {
    pub id: i64,
    pub channel_id: i64,
    pub permission_type: String,
    pub target_type: String,
    pub target_id: String,
    pub allow: bool,
    pub deny: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_settings table
#[derive(Debug, Clone, FromRow)]
pub struct SettingsModel {
    pub channel_id: i64,
    pub slow_mode_interval: i32,
    pub max_pins: i32,
    pub max_bookmarks: i32,
    pub allow_threads: bool,
    pub allow_reactions: bool,
    pub allow_invites: bool,
    pub auto_archive_days: i32,
    pub default_notification: String,
    pub custom_emoji: bool,
    pub link_previews: bool,
    pub member_limit: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_announcements table
#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementModel {
    pub id: i64,
    pub channel_id: i64,
    pub title: String,
    pub content: String,
    pub priority: String,
    pub author_id: i64,
    pub is_pinned: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_activity_log table
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub action: String,
    pub target_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
