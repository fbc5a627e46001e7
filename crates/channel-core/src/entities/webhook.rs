//! Webhook entity - an outbound integration subscribed to channel events

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Event kinds a webhook may subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WebhookEvent {
    #[serde(rename = "message.created")]
    MessageCreated,
    #[serde(rename = "message.updated")]
    MessageUpdated,
    #[serde(rename = "message.deleted")]
    MessageDeleted,
    #[serde(rename = "message.pinned")]
    MessagePinned,
    #[serde(rename = "member.joined")]
    MemberJoined,
    #[serde(rename = "member.left")]
    MemberLeft,
    #[serde(rename = "channel.updated")]
    ChannelUpdated,
    #[serde(rename = "reaction.added")]
    ReactionAdded,
    #[serde(rename = "thread.created")]
    ThreadCreated,
    #[serde(rename = "poll.created")]
    PollCreated,
}

/// Webhook entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub name: String,
    pub url: String,
    pub avatar_url: Option<String>,
    pub events: BTreeSet<WebhookEvent>,
    pub is_active: bool,
    pub created_by: Snowflake,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Webhook {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        name: String,
        url: String,
        events: BTreeSet<WebhookEvent>,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            name,
            url,
            avatar_url: None,
            events,
            is_active: true,
            created_by,
            last_triggered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether an active webhook wants `event`
    #[inline]
    pub fn subscribes_to(&self, event: WebhookEvent) -> bool {
        self.is_active && self.events.contains(&event)
    }
}
