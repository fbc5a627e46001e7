//! Optional infrastructure ports - cache and event stream
//!
//! Both are best-effort: callers log failures and carry on.

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::entities::Channel;
use crate::events::ChannelEvent;
use crate::value_objects::Snowflake;

/// Channel read-through cache and typing presence
#[async_trait]
pub trait ChannelCache: Send + Sync {
    async fn get_channel(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    async fn set_channel(&self, channel: &Channel) -> RepoResult<()>;

    async fn invalidate_channel(&self, id: Snowflake) -> RepoResult<()>;

    /// Record a short-lived typing marker
    async fn set_typing(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Users with a live typing marker
    async fn typing_users(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

/// Outbound event stream
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &ChannelEvent) -> RepoResult<()>;
}
