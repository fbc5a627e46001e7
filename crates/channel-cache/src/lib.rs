//! # channel-cache
//!
//! Redis layer for the channel read-through cache, typing presence, and the
//! outbound event stream.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Channel Cache**: `channel:{id}` read-through entries and short-lived typing markers
//! - **Pub/Sub**: Best-effort publication of channel events
//!
//! ## Example
//!
//! ```ignore
//! use channel_cache::{Publisher, RedisChannelCache, RedisPool};
//!
//! let pool = RedisPool::connect(&config.redis)?;
//! let cache = RedisChannelCache::new(pool.clone());
//! let publisher = Publisher::new(pool, "channel-events");
//!
//! cache.set_typing(channel_id, user_id).await?;
//! publisher.publish(&ChannelEvent::new(EventType::TypingStarted, channel_id, user_id)).await?;
//! ```

pub mod pool;
pub mod pubsub;
pub mod store;

pub use pool::{CacheError, CacheResult, RedisPool};
pub use pubsub::{PubSubChannel, Publisher};
pub use store::{RedisChannelCache, CHANNEL_TTL, TYPING_TTL};
