//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Member not found in channel")]
    MemberNotFound,

    #[error("Invite not found")]
    InviteNotFound,

    #[error("Pin not found")]
    PinNotFound,

    #[error("Bookmark not found")]
    BookmarkNotFound,

    #[error("Permission override not found")]
    PermissionNotFound,

    #[error("Webhook not found")]
    WebhookNotFound,

    #[error("Reaction not found")]
    ReactionNotFound,

    #[error("Announcement not found")]
    AnnouncementNotFound,

    #[error("Section not found")]
    SectionNotFound,

    #[error("Thread not found: {0}")]
    ThreadNotFound(Snowflake),

    #[error("Reply not found")]
    ReplyNotFound,

    #[error("Scheduled message not found")]
    ScheduledMessageNotFound,

    #[error("Template not found")]
    TemplateNotFound,

    #[error("Poll not found: {0}")]
    PollNotFound(Snowflake),

    #[error("Poll option not found")]
    PollOptionNotFound,

    #[error("Tab not found")]
    TabNotFound,

    #[error("Channel link not found")]
    LinkNotFound,

    #[error("Ban not found")]
    BanNotFound,

    #[error("Mute not found")]
    MuteNotFound,

    #[error("Not in voice channel")]
    NotInVoice,

    #[error("Not following channel")]
    NotFollowing,

    #[error("Channel not starred")]
    NotStarred,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Scheduled time must be in the future")]
    ScheduledTimeInPast,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not authorized to perform this action")]
    NotAuthorized,

    #[error("Not a member of this channel")]
    NotMember,

    #[error("Owner cannot leave the channel (transfer ownership first)")]
    CannotLeaveOwner,

    #[error("Cannot remove the channel owner")]
    CannotRemoveOwner,

    #[error("Cannot moderate the channel owner")]
    CannotModerateOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Channel name already taken in this workspace")]
    ChannelNameTaken,

    #[error("Already a member of this channel")]
    AlreadyMember,

    #[error("Reaction already exists")]
    ReactionExists,

    #[error("Message already pinned")]
    AlreadyPinned,

    #[error("Already voted on this poll")]
    AlreadyVoted,

    #[error("Already following this channel")]
    AlreadyFollowing,

    #[error("Already following this thread")]
    AlreadyFollowingThread,

    #[error("Channel already starred")]
    AlreadyStarred,

    #[error("Already in voice channel")]
    AlreadyInVoice,

    #[error("Invite code already exists")]
    InviteCodeExists,

    // =========================================================================
    // State Conflicts
    // =========================================================================
    #[error("Channel is archived")]
    ChannelArchived,

    #[error("User is banned from this channel")]
    UserBanned,

    #[error("Invite is no longer active")]
    InviteInactive,

    #[error("Invite has expired")]
    InviteExpired,

    #[error("Invite has reached maximum uses")]
    InviteMaxUses,

    #[error("Thread is locked")]
    ThreadLocked,

    #[error("Poll is closed")]
    PollClosed,

    #[error("Bookmark limit reached: max {max} per channel")]
    BookmarkLimitReached { max: i64 },

    #[error("Scheduled message is no longer pending")]
    ScheduledMessageNotPending,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::InviteNotFound => "UNKNOWN_INVITE",
            Self::PinNotFound => "UNKNOWN_PIN",
            Self::BookmarkNotFound => "UNKNOWN_BOOKMARK",
            Self::PermissionNotFound => "UNKNOWN_PERMISSION",
            Self::WebhookNotFound => "UNKNOWN_WEBHOOK",
            Self::ReactionNotFound => "UNKNOWN_REACTION",
            Self::AnnouncementNotFound => "UNKNOWN_ANNOUNCEMENT",
            Self::SectionNotFound => "UNKNOWN_SECTION",
            Self::ThreadNotFound(_) => "UNKNOWN_THREAD",
            Self::ReplyNotFound => "UNKNOWN_REPLY",
            Self::ScheduledMessageNotFound => "UNKNOWN_SCHEDULED_MESSAGE",
            Self::TemplateNotFound => "UNKNOWN_TEMPLATE",
            Self::PollNotFound(_) => "UNKNOWN_POLL",
            Self::PollOptionNotFound => "UNKNOWN_POLL_OPTION",
            Self::TabNotFound => "UNKNOWN_TAB",
            Self::LinkNotFound => "UNKNOWN_CHANNEL_LINK",
            Self::BanNotFound => "UNKNOWN_BAN",
            Self::MuteNotFound => "UNKNOWN_MUTE",
            Self::NotInVoice => "NOT_IN_VOICE",
            Self::NotFollowing => "NOT_FOLLOWING",
            Self::NotStarred => "NOT_STARRED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ScheduledTimeInPast => "SCHEDULED_TIME_IN_PAST",

            // Authorization
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::NotMember => "NOT_MEMBER",
            Self::CannotLeaveOwner => "CANNOT_LEAVE_OWNER",
            Self::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",
            Self::CannotModerateOwner => "CANNOT_MODERATE_OWNER",

            // Conflict
            Self::ChannelNameTaken => "CHANNEL_NAME_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::ReactionExists => "REACTION_EXISTS",
            Self::AlreadyPinned => "ALREADY_PINNED",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::AlreadyFollowingThread => "ALREADY_FOLLOWING_THREAD",
            Self::AlreadyStarred => "ALREADY_STARRED",
            Self::AlreadyInVoice => "ALREADY_IN_VOICE",
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",

            // State
            Self::ChannelArchived => "CHANNEL_ARCHIVED",
            Self::UserBanned => "USER_BANNED",
            Self::InviteInactive => "INVITE_INACTIVE",
            Self::InviteExpired => "INVITE_EXPIRED",
            Self::InviteMaxUses => "INVITE_MAX_USES",
            Self::ThreadLocked => "THREAD_LOCKED",
            Self::PollClosed => "POLL_CLOSED",
            Self::BookmarkLimitReached { .. } => "BOOKMARK_LIMIT_REACHED",
            Self::ScheduledMessageNotPending => "SCHEDULED_MESSAGE_NOT_PENDING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ChannelNotFound(_)
                | Self::MemberNotFound
                | Self::InviteNotFound
                | Self::PinNotFound
                | Self::BookmarkNotFound
                | Self::PermissionNotFound
                | Self::WebhookNotFound
                | Self::ReactionNotFound
                | Self::AnnouncementNotFound
                | Self::SectionNotFound
                | Self::ThreadNotFound(_)
                | Self::ReplyNotFound
                | Self::ScheduledMessageNotFound
                | Self::TemplateNotFound
                | Self::PollNotFound(_)
                | Self::PollOptionNotFound
                | Self::TabNotFound
                | Self::LinkNotFound
                | Self::BanNotFound
                | Self::MuteNotFound
                | Self::NotInVoice
                | Self::NotFollowing
                | Self::NotStarred
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::ScheduledTimeInPast)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotAuthorized
                | Self::NotMember
                | Self::CannotLeaveOwner
                | Self::CannotRemoveOwner
                | Self::CannotModerateOwner
        )
    }

    /// Check if this is a duplicate-entity conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ChannelNameTaken
                | Self::AlreadyMember
                | Self::ReactionExists
                | Self::AlreadyPinned
                | Self::AlreadyVoted
                | Self::AlreadyFollowing
                | Self::AlreadyFollowingThread
                | Self::AlreadyStarred
                | Self::AlreadyInVoice
                | Self::InviteCodeExists
        )
    }

    /// Check if the target exists but its state forbids the operation
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            Self::ChannelArchived
                | Self::UserBanned
                | Self::InviteInactive
                | Self::InviteMaxUses
                | Self::ThreadLocked
                | Self::PollClosed
                | Self::BookmarkLimitReached { .. }
                | Self::ScheduledMessageNotPending
        )
    }

    /// Check if the target existed but is permanently gone
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::InviteExpired)
    }
}
