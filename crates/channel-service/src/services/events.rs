//! Best-effort side effects: events, activity log rows, cache invalidation
//!
//! All run after the store write has committed. Failures are logged and
//! never reach the caller.

use channel_core::{ActivityLogEntry, ChannelEvent, EventType, Snowflake};
use serde::Serialize;
use tracing::{debug, warn};

use super::context::ServiceContext;

impl ServiceContext {
    /// Publish an event carrying `data`
    pub(crate) async fn emit<T: Serialize + Sync>(
        &self,
        event_type: EventType,
        channel_id: Snowflake,
        actor_id: Snowflake,
        data: &T,
    ) {
        let Some(publisher) = self.publisher() else {
            return;
        };

        let event = ChannelEvent::new(event_type, channel_id, actor_id).with_data(data);
        match publisher.publish(&event).await {
            Ok(()) => debug!(event = event.name(), channel_id = %channel_id, "Event published"),
            Err(e) => warn!(event = event.name(), channel_id = %channel_id, error = %e, "Failed to publish event"),
        }
    }

    /// Append an activity log row
    pub(crate) async fn record_activity(&self, entry: ActivityLogEntry) {
        if let Err(e) = self.activity_repo().create(&entry).await {
            warn!(channel_id = %entry.channel_id, action = %entry.action, error = %e, "Failed to write activity log");
        }
    }

    /// Drop the cached channel entry
    pub(crate) async fn invalidate_channel(&self, channel_id: Snowflake) {
        if let Some(cache) = self.cache() {
            if let Err(e) = cache.invalidate_channel(channel_id).await {
                warn!(channel_id = %channel_id, error = %e, "Failed to invalidate channel cache");
            }
        }
    }
}
