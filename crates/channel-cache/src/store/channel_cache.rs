//! Channel read-through cache and typing presence in Redis.
//!
//! Channels are stored as JSON under `channel:{id}`. Typing markers live under
//! `typing:{channel}:{user}` and are never cleared explicitly; they expire.

use async_trait::async_trait;
use channel_core::{Channel, ChannelCache, RepoResult, Snowflake};

use crate::pool::RedisPool;

/// Key prefix for cached channels
const CHANNEL_PREFIX: &str = "channel:";
/// Key prefix for typing indicators
const TYPING_PREFIX: &str = "typing:";

/// Cached channel TTL (10 minutes)
pub const CHANNEL_TTL: u64 = 600;
/// Typing indicator TTL (5 seconds)
pub const TYPING_TTL: u64 = 5;

/// SCAN batch size for typing lookups
const SCAN_COUNT: usize = 100;

/// Redis implementation of [`ChannelCache`]
#[derive(Clone)]
pub struct RedisChannelCache {
    pool: RedisPool,
}

impl RedisChannelCache {
    /// Create a new channel cache
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn channel_key(id: Snowflake) -> String {
        format!("{CHANNEL_PREFIX}{id}")
    }

    fn typing_key(channel_id: Snowflake, user_id: Snowflake) -> String {
        format!("{TYPING_PREFIX}{channel_id}:{user_id}")
    }

    fn typing_pattern(channel_id: Snowflake) -> String {
        format!("{TYPING_PREFIX}{channel_id}:*")
    }

    /// Extract the user id from a typing key of the given channel
    fn typing_user(channel_id: Snowflake, key: &str) -> Option<Snowflake> {
        key.strip_prefix(TYPING_PREFIX)?
            .strip_prefix(&channel_id.to_string())?
            .strip_prefix(':')?
            .parse()
            .ok()
    }
}

#[async_trait]
impl ChannelCache for RedisChannelCache {
    async fn get_channel(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let channel = self.pool.get_json(&Self::channel_key(id)).await?;
        tracing::trace!(channel_id = %id, hit = channel.is_some(), "Channel cache lookup");
        Ok(channel)
    }

    async fn set_channel(&self, channel: &Channel) -> RepoResult<()> {
        self.pool
            .put_json(&Self::channel_key(channel.id), channel, CHANNEL_TTL)
            .await?;
        Ok(())
    }

    async fn invalidate_channel(&self, id: Snowflake) -> RepoResult<()> {
        self.pool.remove(&Self::channel_key(id)).await?;
        tracing::debug!(channel_id = %id, "Invalidated cached channel");
        Ok(())
    }

    async fn set_typing(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let now = chrono::Utc::now().timestamp();
        self.pool
            .put_json(&Self::typing_key(channel_id, user_id), &now, TYPING_TTL)
            .await?;

        tracing::debug!(channel_id = %channel_id, user_id = %user_id, "Set typing indicator");
        Ok(())
    }

    async fn typing_users(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let keys = self
            .pool
            .keys_matching(&Self::typing_pattern(channel_id), SCAN_COUNT)
            .await?;

        Ok(keys
            .iter()
            .filter_map(|key| Self::typing_user(channel_id, key))
            .collect())
    }
}
