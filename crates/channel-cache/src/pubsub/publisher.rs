//! Redis Pub/Sub publisher.
//!
//! Publishes committed channel events for gateways and other services.

use async_trait::async_trait;
use channel_core::{ChannelEvent, EventPublisher, RepoResult};
use redis::AsyncCommands;

use crate::pool::{CacheError, CacheResult, RedisPool};
use crate::pubsub::PubSubChannel;

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
    stream: String,
}

impl Publisher {
    /// Create a new publisher writing to `stream`
    #[must_use]
    pub fn new(pool: RedisPool, stream: impl Into<String>) -> Self {
        Self {
            pool,
            stream: stream.into(),
        }
    }

    /// Name of the service-wide stream
    #[must_use]
    pub fn stream(&self) -> &str {
        &self.stream
    }

    /// Destinations for an event: the stream and the event's channel topic
    fn destinations(&self, event: &ChannelEvent) -> [PubSubChannel; 2] {
        [
            PubSubChannel::stream(self.stream.as_str()),
            PubSubChannel::channel(self.stream.as_str(), event.channel_id),
        ]
    }

    /// Publish a raw message to the given destinations, returning total receivers
    pub async fn publish_many(&self, channels: &[PubSubChannel], payload: &str) -> CacheResult<u32> {
        let mut conn = self.pool.conn().await?;
        let mut total_receivers = 0;

        for channel in channels {
            let receivers: u32 = conn.publish(channel.name(), payload).await?;
            total_receivers += receivers;
        }

        Ok(total_receivers)
    }
}

#[async_trait]
impl EventPublisher for Publisher {
    async fn publish(&self, event: &ChannelEvent) -> RepoResult<()> {
        let payload = serde_json::to_string(event).map_err(CacheError::from)?;
        let receivers = self.publish_many(&self.destinations(event), &payload).await?;

        tracing::debug!(
            event_type = event.name(),
            channel_id = %event.channel_id,
            receivers = receivers,
            "Published event"
        );

        Ok(())
    }
}
