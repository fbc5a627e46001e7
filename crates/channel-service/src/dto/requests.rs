//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::collections::BTreeSet;

use channel_core::{
    AnnouncementPriority, ChannelType, LinkType, MemberRole, NotificationLevel, PermissionTarget,
    Snowflake, WebhookEvent,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    pub workspace_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    /// Defaults to public
    #[serde(rename = "type", default)]
    pub channel_type: Option<ChannelType>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Update channel request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 1024, message = "Topic must be at most 1024 characters"))]
    pub topic: Option<String>,

    #[validate(url(message = "Icon must be a valid URL"))]
    pub icon_url: Option<String>,
}

/// Ownership transfer request
#[derive(Debug, Clone, Deserialize)]
pub struct TransferOwnershipRequest {
    pub new_owner_id: Snowflake,
}

/// Clone channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CloneChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub include_members: bool,

    #[serde(default)]
    pub include_pins: bool,

    #[serde(default)]
    pub include_settings: bool,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Add member request
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Snowflake,

    /// Defaults to member
    #[serde(default)]
    pub role: Option<MemberRole>,
}

/// Change a member's role
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: MemberRole,
}

/// Change the caller's notification level
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotificationsRequest {
    pub level: NotificationLevel,
}

/// Bulk add or remove members
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkMembersRequest {
    #[validate(length(min = 1, max = 100, message = "Provide 1-100 user ids"))]
    pub user_ids: Vec<Snowflake>,

    #[serde(default)]
    pub role: Option<MemberRole>,
}

/// Bulk role change
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkRoleRequest {
    #[validate(length(min = 1, max = 100, message = "Provide 1-100 user ids"))]
    pub user_ids: Vec<Snowflake>,

    pub role: MemberRole,
}

// ============================================================================
// Invite / Moderation Requests
// ============================================================================

/// Create invite request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInviteRequest {
    /// 0 = unlimited
    #[serde(default)]
    #[validate(range(min = 0, max = 10_000, message = "max_uses must be between 0 and 10000"))]
    pub max_uses: i32,

    pub expires_at: Option<DateTime<Utc>>,
}

/// Ban or mute request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RestrictMemberRequest {
    #[validate(length(max = 512, message = "Reason must be at most 512 characters"))]
    pub reason: Option<String>,

    /// Absent = permanent
    pub expires_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Thread Requests
// ============================================================================

/// Create thread request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThreadRequest {
    pub message_id: Snowflake,

    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
}

/// Update thread request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateThreadRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    pub is_locked: Option<bool>,

    pub is_resolved: Option<bool>,
}

/// Create reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, max = 4000, message = "Reply must be 1-4000 characters"))]
    pub content: String,

    pub parent_id: Option<Snowflake>,
}

/// Edit reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReplyRequest {
    #[validate(length(min = 1, max = 4000, message = "Reply must be 1-4000 characters"))]
    pub content: String,
}

// ============================================================================
// Reaction / Pin / Bookmark Requests
// ============================================================================

/// Add reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddReactionRequest {
    #[validate(length(min = 1, max = 64, message = "Emoji must be 1-64 characters"))]
    pub emoji: String,
}

/// Pin message request
#[derive(Debug, Clone, Deserialize)]
pub struct PinMessageRequest {
    pub message_id: Snowflake,
}

/// Create bookmark request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookmarkRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(url(message = "Bookmark URL must be valid"))]
    pub url: Option<String>,

    #[validate(length(max = 50))]
    pub entity_type: Option<String>,

    #[validate(length(max = 100))]
    pub entity_id: Option<String>,
}

/// Update bookmark request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookmarkRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "Bookmark URL must be valid"))]
    pub url: Option<String>,
}

// ============================================================================
// Poll Requests
// ============================================================================

/// Create poll request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePollRequest {
    #[validate(length(min = 1, max = 300, message = "Question must be 1-300 characters"))]
    pub question: String,

    #[validate(length(min = 2, max = 10, message = "A poll needs 2-10 options"))]
    pub options: Vec<String>,

    #[serde(default)]
    pub is_anonymous: bool,

    #[serde(default)]
    pub multi_choice: bool,

    pub expires_at: Option<DateTime<Utc>>,
}

/// Cast votes request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VoteRequest {
    #[validate(length(min = 1, max = 10, message = "Select 1-10 options"))]
    pub option_ids: Vec<Snowflake>,
}

// ============================================================================
// Webhook / Permission / Settings Requests
// ============================================================================

/// Create webhook request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWebhookRequest {
    #[validate(length(min = 1, max = 100, message = "Webhook name must be 1-100 characters"))]
    pub name: String,

    #[validate(url(message = "Webhook URL must be valid"))]
    pub url: String,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub events: BTreeSet<WebhookEvent>,
}

/// Update webhook request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWebhookRequest {
    #[validate(length(min = 1, max = 100, message = "Webhook name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(url(message = "Webhook URL must be valid"))]
    pub url: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,

    pub events: Option<BTreeSet<WebhookEvent>>,

    pub is_active: Option<bool>,
}

/// Set a permission override
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPermissionRequest {
    #[validate(length(min = 1, max = 64, message = "Permission type must be 1-64 characters"))]
    pub permission_type: String,

    pub target_type: PermissionTarget,

    #[validate(length(min = 1, max = 64, message = "Target id must be 1-64 characters"))]
    pub target_id: String,

    #[serde(default)]
    pub allow: bool,

    #[serde(default)]
    pub deny: bool,
}

/// Partial settings update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(range(min = 0, max = 21_600, message = "Slow mode must be 0-21600 seconds"))]
    pub slow_mode_interval: Option<i32>,

    #[validate(range(min = 0, max = 500))]
    pub max_pins: Option<i32>,

    #[validate(range(min = 0, max = 100))]
    pub max_bookmarks: Option<i32>,

    pub allow_threads: Option<bool>,
    pub allow_reactions: Option<bool>,
    pub allow_invites: Option<bool>,

    #[validate(range(min = 0, max = 365))]
    pub auto_archive_days: Option<i32>,

    pub default_notification: Option<NotificationLevel>,
    pub custom_emoji: Option<bool>,
    pub link_previews: Option<bool>,

    #[validate(range(min = 0))]
    pub member_limit: Option<i32>,
}

// ============================================================================
// Announcement Requests
// ============================================================================

/// Create announcement request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    #[serde(default)]
    pub priority: AnnouncementPriority,

    pub expires_at: Option<DateTime<Utc>>,
}

/// Update announcement request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: Option<String>,

    pub priority: Option<AnnouncementPriority>,

    pub expires_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Tab / Section / Template Requests
// ============================================================================

/// Add tab request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTabRequest {
    #[validate(length(min = 1, max = 100, message = "Tab name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Tab type must be 1-50 characters"))]
    pub tab_type: String,

    pub config: Option<serde_json::Value>,
}

/// Update tab request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTabRequest {
    #[validate(length(min = 1, max = 100, message = "Tab name must be 1-100 characters"))]
    pub name: Option<String>,

    pub config: Option<serde_json::Value>,
}

/// Reorder tabs request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderTabsRequest {
    #[validate(length(min = 1, max = 100, message = "Provide 1-100 tab ids"))]
    pub tab_ids: Vec<Snowflake>,
}

/// Create section request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSectionRequest {
    pub workspace_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Section name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub channel_ids: Vec<Snowflake>,
}

/// Update section request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSectionRequest {
    #[validate(length(min = 1, max = 100, message = "Section name must be 1-100 characters"))]
    pub name: Option<String>,

    pub channel_ids: Option<Vec<Snowflake>>,

    pub is_collapsed: Option<bool>,
}

/// Create template request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    pub workspace_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Template name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,

    #[validate(length(max = 1024))]
    pub topic: Option<String>,

    pub settings: Option<serde_json::Value>,
}

/// Snapshot an existing channel as a template
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplateFromChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Template name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Update template request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Template name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(max = 1024))]
    pub topic: Option<String>,

    pub settings: Option<serde_json::Value>,
}

/// Create a channel from a template
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub channel_name: String,
}

// ============================================================================
// Scheduled Message Requests
// ============================================================================

/// Schedule a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScheduledMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    /// RFC 3339 timestamp
    pub scheduled_at: String,

    pub thread_id: Option<Snowflake>,
}

/// Reschedule or edit a pending message
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateScheduledMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: Option<String>,

    /// RFC 3339 timestamp
    pub scheduled_at: Option<String>,
}

// ============================================================================
// Read Receipt / Link Requests
// ============================================================================

/// Mark a message read
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub message_id: Snowflake,
}

/// Link two channels
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub target_channel_id: Snowflake,

    #[serde(default)]
    pub link_type: LinkType,
}
