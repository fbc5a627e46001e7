//! Pub/Sub channel definitions.
//!
//! Every event goes to the configured stream (e.g. `channel-events`) and to a
//! per-channel topic `{stream}:{channel_id}` for consumers that follow one channel.

use channel_core::Snowflake;

/// Pub/Sub destinations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// The service-wide event stream
    Stream(String),
    /// Events for one channel on the given stream
    Channel { stream: String, channel_id: Snowflake },
}

impl PubSubChannel {
    /// Create a stream destination
    #[must_use]
    pub fn stream(name: impl Into<String>) -> Self {
        Self::Stream(name.into())
    }

    /// Create a per-channel destination
    #[must_use]
    pub fn channel(stream: impl Into<String>, channel_id: Snowflake) -> Self {
        Self::Channel {
            stream: stream.into(),
            channel_id,
        }
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Stream(name) => name.clone(),
            Self::Channel { stream, channel_id } => format!("{stream}:{channel_id}"),
        }
    }

    /// Parse a Redis channel name published under `stream`
    #[must_use]
    pub fn parse(stream: &str, name: &str) -> Option<Self> {
        if name == stream {
            return Some(Self::stream(stream));
        }

        let id = name.strip_prefix(stream)?.strip_prefix(':')?.parse::<i64>().ok()?;
        Some(Self::channel(stream, Snowflake::from(id)))
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let channel_id = Snowflake::from(67890i64);

        assert_eq!(PubSubChannel::stream("channel-events").name(), "channel-events");
        assert_eq!(
            PubSubChannel::channel("channel-events", channel_id).name(),
            "channel-events:67890"
        );
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(
            PubSubChannel::parse("channel-events", "channel-events"),
            Some(PubSubChannel::stream("channel-events"))
        );
        assert_eq!(
            PubSubChannel::parse("channel-events", "channel-events:67890"),
            Some(PubSubChannel::channel("channel-events", Snowflake::from(67890i64)))
        );
        assert_eq!(PubSubChannel::parse("channel-events", "other:1"), None);
        assert_eq!(PubSubChannel::parse("channel-events", "channel-events:abc"), None);
    }
}
