//! Scheduled message service
//!
//! Stores messages for later delivery. Delivery itself belongs to an external
//! worker that polls `pending_before`.

use channel_core::{DomainError, ScheduledMessage, ScheduledStatus, Snowflake};
use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateScheduledMessageRequest, UpdateScheduledMessageRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Scheduled message service
pub struct ScheduledMessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScheduledMessageService<'a> {
    /// Create a new ScheduledMessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Schedule a message for a future time
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateScheduledMessageRequest,
    ) -> ServiceResult<ScheduledMessage> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let scheduled_at = future_time(&request.scheduled_at, Utc::now())?;

        if let Some(thread_id) = request.thread_id {
            let thread = self
                .ctx
                .thread_repo()
                .find(thread_id)
                .await?
                .ok_or(DomainError::ThreadNotFound(thread_id))?;
            ensure_in_channel(thread.channel_id, channel_id, || DomainError::ThreadNotFound(thread_id))?;
        }

        let mut message = ScheduledMessage::new(
            self.ctx.generate_id(),
            channel_id,
            user_id,
            request.content,
            scheduled_at,
        );
        message.thread_id = request.thread_id;

        self.ctx.scheduled_repo().create(&message).await?;

        info!(channel_id = %channel_id, message_id = %message.id, scheduled_at = %scheduled_at, "Message scheduled");
        Ok(message)
    }

    /// Get one of the caller's scheduled messages
    #[instrument(skip(self))]
    pub async fn get(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<ScheduledMessage> {
        self.load_own(channel_id, user_id, message_id).await
    }

    /// The caller's scheduled messages in a channel
    #[instrument(skip(self))]
    pub async fn list(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<ScheduledMessage>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.scheduled_repo().list_by_channel(channel_id, user_id).await?)
    }

    /// The caller's pending messages across channels
    #[instrument(skip(self))]
    pub async fn list_mine(&self, user_id: Snowflake) -> ServiceResult<Vec<ScheduledMessage>> {
        Ok(self.ctx.scheduled_repo().list_pending_by_user(user_id).await?)
    }

    /// Change content or time while still pending
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        message_id: Snowflake,
        request: UpdateScheduledMessageRequest,
    ) -> ServiceResult<ScheduledMessage> {
        request.validate()?;

        let mut message = self.load_own(channel_id, user_id, message_id).await?;
        if !message.is_pending() {
            return Err(DomainError::ScheduledMessageNotPending.into());
        }

        if let Some(raw) = request.scheduled_at.as_deref() {
            message.scheduled_at = future_time(raw, Utc::now())?;
        }
        if let Some(content) = request.content {
            message.content = content;
        }
        message.updated_at = Utc::now();

        self.ctx.scheduled_repo().update(&message).await?;
        Ok(message)
    }

    /// Cancel a pending message
    #[instrument(skip(self))]
    pub async fn cancel(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<ScheduledMessage> {
        let mut message = self.load_own(channel_id, user_id, message_id).await?;
        if !message.is_pending() {
            return Err(DomainError::ScheduledMessageNotPending.into());
        }

        message.status = ScheduledStatus::Cancelled;
        message.updated_at = Utc::now();
        self.ctx.scheduled_repo().update(&message).await?;

        info!(message_id = %message_id, "Scheduled message cancelled");
        Ok(message)
    }

    /// Pending messages due at or before `before`, oldest first
    #[instrument(skip(self))]
    pub async fn pending_before(&self, before: DateTime<Utc>, limit: i64) -> ServiceResult<Vec<ScheduledMessage>> {
        Ok(self
            .ctx
            .scheduled_repo()
            .pending_before(before, limit.clamp(1, 1000))
            .await?)
    }

    async fn load_own(&self, channel_id: Snowflake, user_id: Snowflake, message_id: Snowflake) -> ServiceResult<ScheduledMessage> {
        let message = self
            .ctx
            .scheduled_repo()
            .find(message_id)
            .await?
            .ok_or(DomainError::ScheduledMessageNotFound)?;
        ensure_in_channel(message.channel_id, channel_id, || DomainError::ScheduledMessageNotFound)?;

        if !message.is_owned_by(user_id) {
            return Err(DomainError::NotAuthorized.into());
        }
        Ok(message)
    }
}

/// Parse an RFC 3339 time that must lie after `now`
fn future_time(raw: &str, now: DateTime<Utc>) -> ServiceResult<DateTime<Utc>> {
    let at = DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|_| ServiceError::validation("scheduled_at must be an RFC 3339 timestamp"))?
        .with_timezone(&Utc);

    if at <= now {
        return Err(DomainError::ScheduledTimeInPast.into());
    }
    Ok(at)
}
