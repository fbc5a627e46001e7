//! Channel events - published after a state change is committed
//!
//! Consumers (gateways, notification workers, search indexers) subscribe to
//! the event stream. Event names follow `entity.verb`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    // =========================================================================
    // Channel Events
    // =========================================================================
    #[serde(rename = "channel.created")]
    ChannelCreated,
    #[serde(rename = "channel.updated")]
    ChannelUpdated,
    #[serde(rename = "channel.deleted")]
    ChannelDeleted,
    #[serde(rename = "channel.archived")]
    ChannelArchived,
    #[serde(rename = "channel.unarchived")]
    ChannelUnarchived,
    #[serde(rename = "channel.cloned")]
    ChannelCloned,
    #[serde(rename = "ownership.transferred")]
    OwnershipTransferred,
    #[serde(rename = "settings.updated")]
    SettingsUpdated,

    // =========================================================================
    // Member Events
    // =========================================================================
    #[serde(rename = "member.joined")]
    MemberJoined,
    #[serde(rename = "member.removed")]
    MemberRemoved,
    #[serde(rename = "member.left")]
    MemberLeft,
    #[serde(rename = "member.role_updated")]
    MemberRoleUpdated,
    #[serde(rename = "members.bulk_added")]
    MembersBulkAdded,
    #[serde(rename = "members.bulk_removed")]
    MembersBulkRemoved,
    #[serde(rename = "members.bulk_role_updated")]
    MembersBulkRoleUpdated,

    // =========================================================================
    // Moderation Events
    // =========================================================================
    #[serde(rename = "member.banned")]
    MemberBanned,
    #[serde(rename = "member.unbanned")]
    MemberUnbanned,
    #[serde(rename = "member.muted")]
    MemberMuted,
    #[serde(rename = "member.unmuted")]
    MemberUnmuted,

    // =========================================================================
    // Feature Events
    // =========================================================================
    #[serde(rename = "invite.created")]
    InviteCreated,
    #[serde(rename = "message.pinned")]
    MessagePinned,
    #[serde(rename = "message.unpinned")]
    MessageUnpinned,
    #[serde(rename = "reaction.added")]
    ReactionAdded,
    #[serde(rename = "reaction.removed")]
    ReactionRemoved,
    #[serde(rename = "thread.created")]
    ThreadCreated,
    #[serde(rename = "thread.reply_created")]
    ThreadReplyCreated,
    #[serde(rename = "poll.created")]
    PollCreated,
    #[serde(rename = "poll.closed")]
    PollClosed,
    #[serde(rename = "announcement.created")]
    AnnouncementCreated,
    #[serde(rename = "webhook.tested")]
    WebhookTested,

    // =========================================================================
    // Presence Events
    // =========================================================================
    #[serde(rename = "voice.joined")]
    VoiceJoined,
    #[serde(rename = "voice.left")]
    VoiceLeft,
    #[serde(rename = "typing.started")]
    TypingStarted,
}

impl EventType {
    /// Get the event type name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChannelCreated => "channel.created",
            Self::ChannelUpdated => "channel.updated",
            Self::ChannelDeleted => "channel.deleted",
            Self::ChannelArchived => "channel.archived",
            Self::ChannelUnarchived => "channel.unarchived",
            Self::ChannelCloned => "channel.cloned",
            Self::OwnershipTransferred => "ownership.transferred",
            Self::SettingsUpdated => "settings.updated",
            Self::MemberJoined => "member.joined",
            Self::MemberRemoved => "member.removed",
            Self::MemberLeft => "member.left",
            Self::MemberRoleUpdated => "member.role_updated",
            Self::MembersBulkAdded => "members.bulk_added",
            Self::MembersBulkRemoved => "members.bulk_removed",
            Self::MembersBulkRoleUpdated => "members.bulk_role_updated",
            Self::MemberBanned => "member.banned",
            Self::MemberUnbanned => "member.unbanned",
            Self::MemberMuted => "member.muted",
            Self::MemberUnmuted => "member.unmuted",
            Self::InviteCreated => "invite.created",
            Self::MessagePinned => "message.pinned",
            Self::MessageUnpinned => "message.unpinned",
            Self::ReactionAdded => "reaction.added",
            Self::ReactionRemoved => "reaction.removed",
            Self::ThreadCreated => "thread.created",
            Self::ThreadReplyCreated => "thread.reply_created",
            Self::PollCreated => "poll.created",
            Self::PollClosed => "poll.closed",
            Self::AnnouncementCreated => "announcement.created",
            Self::WebhookTested => "webhook.tested",
            Self::VoiceJoined => "voice.joined",
            Self::VoiceLeft => "voice.left",
            Self::TypingStarted => "typing.started",
        }
    }
}

/// Event envelope carrying the mutated entity and the acting user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub channel_id: Snowflake,
    pub actor_id: Snowflake,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ChannelEvent {
    pub fn new(event_type: EventType, channel_id: Snowflake, actor_id: Snowflake) -> Self {
        Self {
            event_type,
            channel_id,
            actor_id,
            data: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    /// Attach the affected entity; serialization failures leave the payload empty
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).unwrap_or(serde_json::Value::Null);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.event_type.as_str()
    }
}
