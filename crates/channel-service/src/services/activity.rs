//! Activity log reads
//!
//! Rows are written as side effects by other services; nothing here mutates.

use channel_core::{ActivityLogEntry, Page, Snowflake};
use tracing::instrument;

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Activity log service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A channel's activity, newest first
    #[instrument(skip(self))]
    pub async fn get_channel_activity(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<ActivityLogEntry>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        Ok(self.ctx.activity_repo().list_by_channel(channel_id, page).await?)
    }

    /// The caller's own activity, newest first
    #[instrument(skip(self))]
    pub async fn get_user_activity(&self, user_id: Snowflake, page: Page) -> ServiceResult<Vec<ActivityLogEntry>> {
        Ok(self.ctx.activity_repo().list_by_user(user_id, page).await?)
    }
}
