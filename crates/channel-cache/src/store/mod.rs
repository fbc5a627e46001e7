//! Redis-backed implementations of the channel-core cache port.

mod channel_cache;

pub use channel_cache::{RedisChannelCache, CHANNEL_TTL, TYPING_TTL};
