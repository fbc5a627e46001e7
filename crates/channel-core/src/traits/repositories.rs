//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Methods documented as transactional must
//! apply all of their writes or none of them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ActivityLogEntry, Announcement, Ban, Bookmark, Channel, ChannelFollower, ChannelLink,
    ChannelMember, ChannelSettings, ChannelStats, ChannelTab, ChannelTemplate, DailyActivity,
    Invite, MemberRole, ModerationEntry, Mute, NotificationLevel, PermissionOverride, Pin, Poll,
    PollOption, PollResult, PollVote, Reaction, ReactionSummary, ReadReceipt, ScheduledMessage,
    Section, StarredChannel, Thread, ThreadFollower, ThreadReply, TopicHistory, VoiceState,
    Webhook,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Limit/offset window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

/// Rows written together when a channel is created, cloned, or stamped
/// from a template
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub channel: Channel,
    pub owner: ChannelMember,
    /// Members besides the owner
    pub members: Vec<ChannelMember>,
    pub pins: Vec<Pin>,
    pub settings: Option<ChannelSettings>,
}

impl NewChannel {
    pub fn new(channel: Channel, owner: ChannelMember) -> Self {
        Self {
            channel,
            owner,
            members: Vec::new(),
            pins: Vec::new(),
            settings: None,
        }
    }
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find a non-deleted channel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Check whether a non-deleted channel in the workspace uses this name
    async fn name_exists(&self, workspace_id: Snowflake, name: &str) -> RepoResult<bool>;

    /// Insert the channel with its owner, extra members, pins and settings (transactional)
    async fn create(&self, new: &NewChannel) -> RepoResult<()>;

    /// Update name, description, topic, icon, and append the topic change
    /// when there is one (transactional)
    async fn update(&self, channel: &Channel, topic_change: Option<&TopicHistory>) -> RepoResult<()>;

    /// Set or clear the archived flag
    async fn set_archived(&self, id: Snowflake, archived: bool) -> RepoResult<()>;

    /// Soft delete a channel
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// List workspace channels ordered by name
    async fn list_by_workspace(&self, workspace_id: Snowflake) -> RepoResult<Vec<Channel>>;

    /// List workspace channels the user belongs to
    async fn list_by_member(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Channel>>;

    /// Case-insensitive match on name or description
    async fn search(&self, workspace_id: Snowflake, query: &str, limit: i64) -> RepoResult<Vec<Channel>>;

    async fn stats(&self, channel_id: Snowflake) -> RepoResult<ChannelStats>;

    /// Distinct readers per day over the last `days` days
    async fn daily_activity(&self, channel_id: Snowflake, days: i64) -> RepoResult<Vec<DailyActivity>>;

    /// Topic changes, newest first
    async fn topic_history(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<TopicHistory>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by channel and user ID
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ChannelMember>>;

    /// List all members of a channel, oldest first
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelMember>>;

    async fn count(&self, channel_id: Snowflake) -> RepoResult<i64>;

    /// Add a member
    async fn create(&self, member: &ChannelMember) -> RepoResult<()>;

    /// Add many members, skipping existing rows (transactional); returns the user ids inserted
    async fn create_many(&self, members: &[ChannelMember]) -> RepoResult<Vec<Snowflake>>;

    /// Remove a member
    async fn delete(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    async fn update_role(&self, channel_id: Snowflake, user_id: Snowflake, role: MemberRole) -> RepoResult<()>;

    async fn update_notifications(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        level: NotificationLevel,
    ) -> RepoResult<()>;

    async fn update_last_read(&self, channel_id: Snowflake, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;

    /// Promote `to` to owner and demote `from` to admin (transactional)
    async fn transfer_ownership(&self, channel_id: Snowflake, from: Snowflake, to: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Invite Repository
// ============================================================================

#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invite>>;

    /// Find invite by code
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Invite>>;

    async fn code_exists(&self, code: &str) -> RepoResult<bool>;

    /// List active invites for a channel
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Invite>>;

    async fn create(&self, invite: &Invite) -> RepoResult<()>;

    /// Mark an invite inactive
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()>;

    /// Insert the member and bump the use count (transactional)
    async fn redeem(&self, invite_id: Snowflake, member: &ChannelMember) -> RepoResult<()>;

    /// Deactivate every expired invite; returns rows touched
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Moderation Repository
// ============================================================================

#[async_trait]
pub trait ModerationRepository: Send + Sync {
    /// Ban record regardless of expiry
    async fn find_ban(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Ban>>;

    async fn find_mute(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Mute>>;

    /// Check for a ban with no expiry or an expiry after `now`
    async fn is_banned(&self, channel_id: Snowflake, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool>;

    async fn is_muted(&self, channel_id: Snowflake, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool>;

    /// Upsert the ban, drop the membership, append the log row (transactional)
    async fn ban(&self, ban: &Ban, log: &ModerationEntry) -> RepoResult<()>;

    /// Delete the ban and append the log row (transactional)
    async fn unban(&self, channel_id: Snowflake, user_id: Snowflake, log: &ModerationEntry) -> RepoResult<()>;

    /// Upsert the mute and append the log row (transactional)
    async fn mute(&self, mute: &Mute, log: &ModerationEntry) -> RepoResult<()>;

    async fn unmute(&self, channel_id: Snowflake, user_id: Snowflake, log: &ModerationEntry) -> RepoResult<()>;

    /// List all bans for a channel, newest first
    async fn list_bans(&self, channel_id: Snowflake) -> RepoResult<Vec<Ban>>;

    /// List all mutes for a channel, newest first
    async fn list_mutes(&self, channel_id: Snowflake) -> RepoResult<Vec<Mute>>;

    /// Moderation log, newest first
    async fn history(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<ModerationEntry>>;
}

// ============================================================================
// Thread Repository
// ============================================================================

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Thread>>;

    /// Threads newest first
    async fn list(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<Thread>>;

    /// Insert the thread with its creator as first follower (transactional)
    async fn create(&self, thread: &Thread, follower: &ThreadFollower) -> RepoResult<()>;

    /// Update title and lock/resolve flags
    async fn update(&self, thread: &Thread) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn find_reply(&self, id: Snowflake) -> RepoResult<Option<ThreadReply>>;

    /// Replies oldest first
    async fn list_replies(&self, thread_id: Snowflake, page: Page) -> RepoResult<Vec<ThreadReply>>;

    /// Insert the reply and bump reply_count/last_reply_at (transactional)
    async fn create_reply(&self, reply: &ThreadReply) -> RepoResult<()>;

    async fn update_reply(&self, reply: &ThreadReply) -> RepoResult<()>;

    /// Delete the reply and decrement reply_count, floored at zero (transactional)
    async fn delete_reply(&self, thread_id: Snowflake, reply_id: Snowflake) -> RepoResult<()>;

    async fn find_follower(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ThreadFollower>>;

    async fn add_follower(&self, follower: &ThreadFollower) -> RepoResult<()>;

    async fn remove_follower(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Reaction / Pin / Bookmark Repositories
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find reaction by message, user, and emoji
    async fn find(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<Option<Reaction>>;

    /// Get all reactions for a message
    async fn list_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<Reaction>>;

    /// Count reactions by emoji for a message
    async fn summary(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<ReactionSummary>>;

    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait PinRepository: Send + Sync {
    async fn find(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Option<Pin>>;

    /// Pins newest first
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Pin>>;

    async fn create(&self, pin: &Pin) -> RepoResult<()>;

    async fn delete(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Bookmark>>;

    /// A user's bookmarks in a channel, by position
    async fn list(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Bookmark>>;

    async fn count(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<i64>;

    /// Current max position + 1, or 0 when empty
    async fn next_position(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<i32>;

    async fn create(&self, bookmark: &Bookmark) -> RepoResult<()>;

    async fn update(&self, bookmark: &Bookmark) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Poll Repository
// ============================================================================

#[async_trait]
pub trait PollRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Poll>>;

    /// Options ordered by position
    async fn options(&self, poll_id: Snowflake) -> RepoResult<Vec<PollOption>>;

    /// Polls newest first
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Poll>>;

    /// Insert the poll with its options (transactional)
    async fn create(&self, poll: &Poll, options: &[PollOption]) -> RepoResult<()>;

    async fn has_voted(&self, poll_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Insert every vote or none (transactional)
    async fn cast_votes(&self, votes: &[PollVote]) -> RepoResult<()>;

    async fn close(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;

    /// Vote count per option, by option position
    async fn results(&self, poll_id: Snowflake) -> RepoResult<Vec<PollResult>>;
}

// ============================================================================
// Webhook / Permission / Settings Repositories
// ============================================================================

#[async_trait]
pub trait WebhookRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Webhook>>;

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Webhook>>;

    async fn create(&self, webhook: &Webhook) -> RepoResult<()>;

    async fn update(&self, webhook: &Webhook) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Stamp last_triggered_at
    async fn touch(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;
}

#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<PermissionOverride>>;

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<PermissionOverride>>;

    /// Insert or update on (channel, permission_type, target_type, target_id); returns the stored row
    async fn upsert(&self, permission: &PermissionOverride) -> RepoResult<PermissionOverride>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find(&self, channel_id: Snowflake) -> RepoResult<Option<ChannelSettings>>;

    /// Insert or replace the channel's settings row
    async fn upsert(&self, settings: &ChannelSettings) -> RepoResult<()>;
}

// ============================================================================
// Announcement Repository
// ============================================================================

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Announcement>>;

    /// Pinned first, then newest first
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Announcement>>;

    async fn create(&self, announcement: &Announcement) -> RepoResult<()>;

    async fn update(&self, announcement: &Announcement) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Tab / Section / Template Repositories
// ============================================================================

#[async_trait]
pub trait TabRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelTab>>;

    /// Tabs by position
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelTab>>;

    async fn next_position(&self, channel_id: Snowflake) -> RepoResult<i32>;

    async fn create(&self, tab: &ChannelTab) -> RepoResult<()>;

    async fn update(&self, tab: &ChannelTab) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Assign positions 0..n in list order (transactional)
    async fn reorder(&self, channel_id: Snowflake, tab_ids: &[Snowflake]) -> RepoResult<()>;
}

#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Section>>;

    /// A user's sections in a workspace, by position
    async fn list(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Section>>;

    async fn next_position(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<i32>;

    async fn create(&self, section: &Section) -> RepoResult<()>;

    async fn update(&self, section: &Section) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelTemplate>>;

    /// Workspace templates, most used first
    async fn list(&self, workspace_id: Snowflake) -> RepoResult<Vec<ChannelTemplate>>;

    async fn create(&self, template: &ChannelTemplate) -> RepoResult<()>;

    async fn update(&self, template: &ChannelTemplate) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn increment_use(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Scheduled Message Repository
// ============================================================================

#[async_trait]
pub trait ScheduledMessageRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ScheduledMessage>>;

    /// A user's scheduled messages in one channel, soonest first
    async fn list_by_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<ScheduledMessage>>;

    /// All of a user's pending messages, soonest first
    async fn list_pending_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<ScheduledMessage>>;

    async fn create(&self, message: &ScheduledMessage) -> RepoResult<()>;

    /// Update content, schedule, status and sent_at
    async fn update(&self, message: &ScheduledMessage) -> RepoResult<()>;

    /// Pending messages due at or before `before`
    async fn pending_before(&self, before: DateTime<Utc>, limit: i64) -> RepoResult<Vec<ScheduledMessage>>;
}

// ============================================================================
// Voice / Follower / Starred / Read Receipt Repositories
// ============================================================================

#[async_trait]
pub trait VoiceRepository: Send + Sync {
    /// The user's live (not disconnected) session
    async fn find_active(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<VoiceState>>;

    async fn list_active(&self, channel_id: Snowflake) -> RepoResult<Vec<VoiceState>>;

    async fn count_active(&self, channel_id: Snowflake) -> RepoResult<i64>;

    async fn create(&self, state: &VoiceState) -> RepoResult<()>;

    /// Persist the four flags
    async fn update_flags(&self, state: &VoiceState) -> RepoResult<()>;

    async fn disconnect(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;
}

#[async_trait]
pub trait FollowerRepository: Send + Sync {
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ChannelFollower>>;

    async fn create(&self, follower: &ChannelFollower) -> RepoResult<()>;

    async fn delete(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Followers newest first
    async fn list(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<ChannelFollower>>;

    async fn count(&self, channel_id: Snowflake) -> RepoResult<i64>;

    /// Channel ids the user follows
    async fn list_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

#[async_trait]
pub trait StarredRepository: Send + Sync {
    async fn find(&self, user_id: Snowflake, channel_id: Snowflake) -> RepoResult<Option<StarredChannel>>;

    async fn next_position(&self, user_id: Snowflake) -> RepoResult<i32>;

    async fn create(&self, starred: &StarredChannel) -> RepoResult<()>;

    async fn delete(&self, user_id: Snowflake, channel_id: Snowflake) -> RepoResult<()>;

    /// Starred channels by position
    async fn list(&self, user_id: Snowflake) -> RepoResult<Vec<StarredChannel>>;
}

#[async_trait]
pub trait ReadReceiptRepository: Send + Sync {
    /// Insert or refresh read_at on (channel, user, message)
    async fn upsert(&self, receipt: &ReadReceipt) -> RepoResult<()>;

    async fn list_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<ReadReceipt>>;

    async fn count_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Activity Log / Channel Link Repositories
// ============================================================================

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn create(&self, entry: &ActivityLogEntry) -> RepoResult<()>;

    /// Newest first
    async fn list_by_channel(&self, channel_id: Snowflake, page: Page) -> RepoResult<Vec<ActivityLogEntry>>;

    /// Newest first
    async fn list_by_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<ActivityLogEntry>>;
}

#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelLink>>;

    /// Active links where the channel is source or target
    async fn list_active(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelLink>>;

    async fn create(&self, link: &ChannelLink) -> RepoResult<()>;

    async fn deactivate(&self, id: Snowflake) -> RepoResult<()>;
}
