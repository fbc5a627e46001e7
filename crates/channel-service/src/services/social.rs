//! Followers, starred channels and read receipts
//!
//! Following and starring need no membership; any authenticated user may
//! follow or star any live channel.

use channel_core::{ChannelFollower, DomainError, Page, ReadReceipt, Snowflake, StarredChannel};
use tracing::{info, instrument};

use crate::dto::{FollowStatus, ReadReceiptSummary};

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

// ============================================================================
// Followers
// ============================================================================

/// Channel follower service
pub struct FollowerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowerService<'a> {
    /// Create a new FollowerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow a channel
    #[instrument(skip(self))]
    pub async fn follow(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelFollower> {
        ChannelAccess::new(self.ctx).channel(channel_id).await?;

        if self.ctx.follower_repo().find(channel_id, user_id).await?.is_some() {
            return Err(DomainError::AlreadyFollowing.into());
        }

        let follower = ChannelFollower::new(self.ctx.generate_id(), channel_id, user_id);
        self.ctx.follower_repo().create(&follower).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Channel followed");
        Ok(follower)
    }

    /// Stop following a channel
    #[instrument(skip(self))]
    pub async fn unfollow(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.follower_repo().find(channel_id, user_id).await?.is_none() {
            return Err(DomainError::NotFollowing.into());
        }
        self.ctx.follower_repo().delete(channel_id, user_id).await?;
        Ok(())
    }

    /// Followers, newest first
    #[instrument(skip(self))]
    pub async fn list_followers(&self, channel_id: Snowflake, page: Page) -> ServiceResult<Vec<ChannelFollower>> {
        Ok(self.ctx.follower_repo().list(channel_id, page).await?)
    }

    /// Whether the caller follows the channel
    #[instrument(skip(self))]
    pub async fn is_following(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<FollowStatus> {
        let following = self.ctx.follower_repo().find(channel_id, user_id).await?.is_some();
        Ok(FollowStatus { channel_id, following })
    }

    /// Number of followers
    #[instrument(skip(self))]
    pub async fn count(&self, channel_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.follower_repo().count(channel_id).await?)
    }

    /// Channel ids the caller follows
    #[instrument(skip(self))]
    pub async fn list_followed_channels(&self, user_id: Snowflake) -> ServiceResult<Vec<Snowflake>> {
        Ok(self.ctx.follower_repo().list_by_user(user_id).await?)
    }
}

// ============================================================================
// Starred
// ============================================================================

/// Starred channel service
pub struct StarredService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StarredService<'a> {
    /// Create a new StarredService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Star a channel at the end of the caller's list
    #[instrument(skip(self))]
    pub async fn star(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<StarredChannel> {
        ChannelAccess::new(self.ctx).channel(channel_id).await?;

        if self.ctx.starred_repo().find(user_id, channel_id).await?.is_some() {
            return Err(DomainError::AlreadyStarred.into());
        }

        let position = self.ctx.starred_repo().next_position(user_id).await?;
        let starred = StarredChannel::new(self.ctx.generate_id(), user_id, channel_id, position);
        self.ctx.starred_repo().create(&starred).await?;
        Ok(starred)
    }

    /// Remove a star
    #[instrument(skip(self))]
    pub async fn unstar(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.starred_repo().find(user_id, channel_id).await?.is_none() {
            return Err(DomainError::NotStarred.into());
        }
        self.ctx.starred_repo().delete(user_id, channel_id).await?;
        Ok(())
    }

    /// The caller's stars by position
    #[instrument(skip(self))]
    pub async fn list_starred(&self, user_id: Snowflake) -> ServiceResult<Vec<StarredChannel>> {
        Ok(self.ctx.starred_repo().list(user_id).await?)
    }
}

// ============================================================================
// Read receipts
// ============================================================================

/// Read receipt service
pub struct ReadReceiptService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReadReceiptService<'a> {
    /// Create a new ReadReceiptService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record that the caller read a message
    #[instrument(skip(self))]
    pub async fn mark_read(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<ReadReceipt> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let receipt = ReadReceipt::new(self.ctx.generate_id(), channel_id, user_id, message_id);
        self.ctx.read_receipt_repo().upsert(&receipt).await?;
        Ok(receipt)
    }

    /// Who has read a message
    #[instrument(skip(self))]
    pub async fn list_receipts(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<ReadReceiptSummary> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let read_by: Vec<Snowflake> = self
            .ctx
            .read_receipt_repo()
            .list_by_message(channel_id, message_id)
            .await?
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        let read_count = i64::try_from(read_by.len()).unwrap_or(i64::MAX);

        Ok(ReadReceiptSummary {
            message_id,
            read_by,
            read_count,
        })
    }

    /// How many members have read a message
    #[instrument(skip(self))]
    pub async fn read_count(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<i64> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.read_receipt_repo().count_by_message(channel_id, message_id).await?)
    }
}
