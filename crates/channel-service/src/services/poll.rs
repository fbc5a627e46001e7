//! Poll service
//!
//! A poll is open until closed or past its expiry. Each user votes once per
//! poll; a multi-choice ballot covers all selected options in one write.

use std::collections::HashSet;

use channel_core::{DomainError, EventType, Poll, PollOption, PollVote, Snowflake};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePollRequest, PollResponse, PollResultsResponse, VoteRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Poll service
pub struct PollService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PollService<'a> {
    /// Create a new PollService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a poll with its options
    #[instrument(skip(self, request))]
    pub async fn create_poll(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreatePollRequest,
    ) -> ServiceResult<PollResponse> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let texts: Vec<String> = request.options.iter().map(|o| o.trim().to_string()).collect();
        if texts.iter().any(String::is_empty) {
            return Err(ServiceError::validation("Poll options cannot be empty"));
        }
        if request.expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(ServiceError::validation("Poll expiry must be in the future"));
        }

        let mut poll = Poll::new(self.ctx.generate_id(), channel_id, user_id, request.question);
        poll.is_anonymous = request.is_anonymous;
        poll.multi_choice = request.multi_choice;
        poll.expires_at = request.expires_at;

        let options: Vec<PollOption> = texts
            .into_iter()
            .zip(0..)
            .map(|(text, position)| PollOption::new(self.ctx.generate_id(), poll.id, text, position))
            .collect();

        self.ctx.poll_repo().create(&poll, &options).await?;

        info!(channel_id = %channel_id, poll_id = %poll.id, options = options.len(), "Poll created");

        let response = PollResponse { poll, options };
        self.ctx.emit(EventType::PollCreated, channel_id, user_id, &response).await;
        Ok(response)
    }

    /// Get a poll and its options
    #[instrument(skip(self))]
    pub async fn get_poll(&self, channel_id: Snowflake, user_id: Snowflake, poll_id: Snowflake) -> ServiceResult<PollResponse> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        let poll = self.load(channel_id, poll_id).await?;
        let options = self.ctx.poll_repo().options(poll_id).await?;
        Ok(PollResponse { poll, options })
    }

    /// Polls in a channel, newest first
    #[instrument(skip(self))]
    pub async fn list_polls(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Poll>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.poll_repo().list(channel_id).await?)
    }

    /// Cast the caller's ballot
    #[instrument(skip(self, request))]
    pub async fn vote(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        poll_id: Snowflake,
        request: VoteRequest,
    ) -> ServiceResult<()> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let poll = self.load(channel_id, poll_id).await?;
        if !poll.is_open_at(Utc::now()) {
            return Err(DomainError::PollClosed.into());
        }
        if self.ctx.poll_repo().has_voted(poll_id, user_id).await? {
            return Err(DomainError::AlreadyVoted.into());
        }

        let mut seen = HashSet::new();
        let selected: Vec<Snowflake> = request.option_ids.into_iter().filter(|id| seen.insert(*id)).collect();
        if !poll.multi_choice && selected.len() > 1 {
            return Err(ServiceError::validation("This poll allows a single choice"));
        }

        let known: HashSet<Snowflake> = self
            .ctx
            .poll_repo()
            .options(poll_id)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();
        if selected.iter().any(|id| !known.contains(id)) {
            return Err(DomainError::PollOptionNotFound.into());
        }

        let votes: Vec<PollVote> = selected
            .into_iter()
            .map(|option_id| PollVote::new(self.ctx.generate_id(), poll_id, option_id, user_id))
            .collect();
        self.ctx.poll_repo().cast_votes(&votes).await?;

        info!(poll_id = %poll_id, choices = votes.len(), "Vote cast");
        Ok(())
    }

    /// Close a poll (creator or owner/admin)
    #[instrument(skip(self))]
    pub async fn close_poll(&self, channel_id: Snowflake, user_id: Snowflake, poll_id: Snowflake) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.require_member(channel_id, user_id).await?;
        let poll = self.load(channel_id, poll_id).await?;
        access.require_author_or_moderator(channel_id, user_id, poll.created_by).await?;

        if poll.is_closed {
            return Err(DomainError::PollClosed.into());
        }
        self.ctx.poll_repo().close(poll_id, Utc::now()).await?;

        info!(poll_id = %poll_id, "Poll closed");

        self.ctx
            .emit(EventType::PollClosed, channel_id, user_id, &json!({ "poll_id": poll_id }))
            .await;
        Ok(())
    }

    /// Vote counts per option
    #[instrument(skip(self))]
    pub async fn get_results(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        poll_id: Snowflake,
    ) -> ServiceResult<PollResultsResponse> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        let poll = self.load(channel_id, poll_id).await?;

        let results = self.ctx.poll_repo().results(poll_id).await?;
        let total_votes = results.iter().map(|r| r.vote_count).sum();

        Ok(PollResultsResponse {
            poll_id,
            is_closed: !poll.is_open_at(Utc::now()),
            total_votes,
            results,
        })
    }

    async fn load(&self, channel_id: Snowflake, poll_id: Snowflake) -> ServiceResult<Poll> {
        let poll = self
            .ctx
            .poll_repo()
            .find(poll_id)
            .await?
            .ok_or(DomainError::PollNotFound(poll_id))?;
        ensure_in_channel(poll.channel_id, channel_id, || DomainError::PollNotFound(poll_id))?;
        Ok(poll)
    }
}
