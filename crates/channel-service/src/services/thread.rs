//! Thread service
//!
//! Threads hang off a channel message. Reply counters are maintained by the
//! store in the same transaction as the reply write.

use channel_core::{DomainError, EventType, Page, Snowflake, Thread, ThreadFollower, ThreadReply};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateReplyRequest, CreateThreadRequest, UpdateReplyRequest, UpdateThreadRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a thread on a message; the creator follows it
    #[instrument(skip(self, request))]
    pub async fn create_thread(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateThreadRequest,
    ) -> ServiceResult<Thread> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_member(channel_id, user_id).await?;

        let thread = Thread::new(
            self.ctx.generate_id(),
            channel_id,
            request.message_id,
            request.title,
            user_id,
        );
        let follower = ThreadFollower::new(self.ctx.generate_id(), thread.id, user_id);
        self.ctx.thread_repo().create(&thread, &follower).await?;

        info!(channel_id = %channel_id, thread_id = %thread.id, "Thread created");

        self.ctx.emit(EventType::ThreadCreated, channel_id, user_id, &thread).await;
        Ok(thread)
    }

    /// Get a thread
    #[instrument(skip(self))]
    pub async fn get_thread(&self, channel_id: Snowflake, user_id: Snowflake, thread_id: Snowflake) -> ServiceResult<Thread> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.load(channel_id, thread_id).await
    }

    /// Threads in a channel, most recently active first
    #[instrument(skip(self))]
    pub async fn list_threads(&self, channel_id: Snowflake, user_id: Snowflake, page: Page) -> ServiceResult<Vec<Thread>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.thread_repo().list(channel_id, page).await?)
    }

    /// Retitle, lock or resolve a thread
    #[instrument(skip(self, request))]
    pub async fn update_thread(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        thread_id: Snowflake,
        request: UpdateThreadRequest,
    ) -> ServiceResult<Thread> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        access.require_member(channel_id, user_id).await?;
        let mut thread = self.load(channel_id, thread_id).await?;
        access
            .require_author_or_moderator(channel_id, user_id, thread.created_by)
            .await?;

        if request.title.is_some() {
            thread.title = request.title;
        }
        if let Some(locked) = request.is_locked {
            thread.is_locked = locked;
        }
        if let Some(resolved) = request.is_resolved {
            thread.is_resolved = resolved;
        }
        thread.updated_at = chrono::Utc::now();

        self.ctx.thread_repo().update(&thread).await?;

        info!(thread_id = %thread_id, locked = thread.is_locked, resolved = thread.is_resolved, "Thread updated");
        Ok(thread)
    }

    /// Delete a thread and its replies
    #[instrument(skip(self))]
    pub async fn delete_thread(&self, channel_id: Snowflake, user_id: Snowflake, thread_id: Snowflake) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.require_member(channel_id, user_id).await?;
        let thread = self.load(channel_id, thread_id).await?;
        access
            .require_author_or_moderator(channel_id, user_id, thread.created_by)
            .await?;

        self.ctx.thread_repo().delete(thread_id).await?;

        info!(channel_id = %channel_id, thread_id = %thread_id, "Thread deleted");
        Ok(())
    }

    /// Reply to a thread
    #[instrument(skip(self, request))]
    pub async fn create_reply(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        thread_id: Snowflake,
        request: CreateReplyRequest,
    ) -> ServiceResult<ThreadReply> {
        request.validate()?;

        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        let thread = self.load(channel_id, thread_id).await?;

        if !thread.accepts_replies() {
            return Err(DomainError::ThreadLocked.into());
        }
        if let Some(parent_id) = request.parent_id {
            self.load_reply(thread_id, parent_id).await?;
        }

        let reply = ThreadReply::new(
            self.ctx.generate_id(),
            thread_id,
            user_id,
            request.content,
            request.parent_id,
        );
        self.ctx.thread_repo().create_reply(&reply).await?;

        info!(thread_id = %thread_id, reply_id = %reply.id, "Thread reply created");

        self.ctx
            .emit(EventType::ThreadReplyCreated, channel_id, user_id, &reply)
            .await;
        Ok(reply)
    }

    /// Replies oldest first
    #[instrument(skip(self))]
    pub async fn list_replies(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        thread_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<ThreadReply>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.load(channel_id, thread_id).await?;
        Ok(self.ctx.thread_repo().list_replies(thread_id, page).await?)
    }

    /// Edit a reply (author only)
    #[instrument(skip(self, request))]
    pub async fn update_reply(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        thread_id: Snowflake,
        reply_id: Snowflake,
        request: UpdateReplyRequest,
    ) -> ServiceResult<ThreadReply> {
        request.validate()?;

        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.load(channel_id, thread_id).await?;
        let mut reply = self.load_reply(thread_id, reply_id).await?;

        if !reply.is_authored_by(user_id) {
            return Err(DomainError::NotAuthorized.into());
        }

        reply.edit(request.content);
        self.ctx.thread_repo().update_reply(&reply).await?;
        Ok(reply)
    }

    /// Delete a reply (author or owner/admin)
    #[instrument(skip(self))]
    pub async fn delete_reply(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        thread_id: Snowflake,
        reply_id: Snowflake,
    ) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.require_member(channel_id, user_id).await?;
        self.load(channel_id, thread_id).await?;
        let reply = self.load_reply(thread_id, reply_id).await?;
        access.require_author_or_moderator(channel_id, user_id, reply.user_id).await?;

        self.ctx.thread_repo().delete_reply(thread_id, reply_id).await?;

        info!(thread_id = %thread_id, reply_id = %reply_id, "Thread reply deleted");
        Ok(())
    }

    /// Follow a thread
    #[instrument(skip(self))]
    pub async fn follow_thread(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        thread_id: Snowflake,
    ) -> ServiceResult<ThreadFollower> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.load(channel_id, thread_id).await?;

        if self.ctx.thread_repo().find_follower(thread_id, user_id).await?.is_some() {
            return Err(DomainError::AlreadyFollowingThread.into());
        }

        let follower = ThreadFollower::new(self.ctx.generate_id(), thread_id, user_id);
        self.ctx.thread_repo().add_follower(&follower).await?;
        Ok(follower)
    }

    /// Stop following a thread
    #[instrument(skip(self))]
    pub async fn unfollow_thread(&self, channel_id: Snowflake, user_id: Snowflake, thread_id: Snowflake) -> ServiceResult<()> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        self.load(channel_id, thread_id).await?;

        if self.ctx.thread_repo().find_follower(thread_id, user_id).await?.is_none() {
            return Err(DomainError::NotFollowing.into());
        }

        self.ctx.thread_repo().remove_follower(thread_id, user_id).await?;
        Ok(())
    }

    async fn load(&self, channel_id: Snowflake, thread_id: Snowflake) -> ServiceResult<Thread> {
        let thread = self
            .ctx
            .thread_repo()
            .find(thread_id)
            .await?
            .ok_or(DomainError::ThreadNotFound(thread_id))?;
        ensure_in_channel(thread.channel_id, channel_id, || DomainError::ThreadNotFound(thread_id))?;
        Ok(thread)
    }

    async fn load_reply(&self, thread_id: Snowflake, reply_id: Snowflake) -> ServiceResult<ThreadReply> {
        let reply = self
            .ctx
            .thread_repo()
            .find_reply(reply_id)
            .await?
            .ok_or(DomainError::ReplyNotFound)?;
        ensure_in_channel(reply.thread_id, thread_id, || DomainError::ReplyNotFound)?;
        Ok(reply)
    }
}
