//! Channel service
//!
//! Channel lifecycle: create, read-through get, update with topic history,
//! archive, soft delete, ownership transfer, clone, stats.

use channel_core::entities::activity_log::actions;
use channel_core::{
    ActivityLogEntry, Channel, ChannelMember, ChannelStats, DailyActivity, DomainError, EventType,
    MemberRole, NewChannel, Page, Pin, Snowflake, TopicHistory,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{ChannelResponse, CloneChannelRequest, CreateChannelRequest, UpdateChannelRequest};

use super::access::ChannelAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Search results are capped
pub const SEARCH_LIMIT: i64 = 50;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel with the caller as owner
    #[instrument(skip(self, request), fields(workspace_id = %request.workspace_id))]
    pub async fn create_channel(&self, user_id: Snowflake, request: CreateChannelRequest) -> ServiceResult<Channel> {
        request.validate()?;

        let channel = Channel::new(
            self.ctx.generate_id(),
            request.workspace_id,
            request.name.trim().to_string(),
            request.channel_type.unwrap_or_default(),
            user_id,
        )
        .with_description(request.description);

        let new = self.draft(channel, user_id);
        self.insert_channel(&new).await?;
        Ok(new.channel)
    }

    /// A channel bundle owned by `user_id`, ready for extra rows
    pub(crate) fn draft(&self, channel: Channel, user_id: Snowflake) -> NewChannel {
        let owner = ChannelMember::new(self.ctx.generate_id(), channel.id, user_id, MemberRole::Owner);
        NewChannel::new(channel, owner)
    }

    /// Shared insert path for create, clone and template apply; every row
    /// in the bundle lands in one write
    pub(crate) async fn insert_channel(&self, new: &NewChannel) -> ServiceResult<()> {
        let channel = &new.channel;
        let user_id = new.owner.user_id;
        if self.ctx.channel_repo().name_exists(channel.workspace_id, &channel.name).await? {
            return Err(DomainError::ChannelNameTaken.into());
        }

        self.ctx.channel_repo().create(new).await?;

        info!(
            channel_id = %channel.id,
            workspace_id = %channel.workspace_id,
            owner_id = %user_id,
            members = new.members.len(),
            pins = new.pins.len(),
            "Channel created"
        );

        self.ctx
            .record_activity(ActivityLogEntry::new(self.ctx.generate_id(), channel.id, user_id, actions::CHANNEL_CREATED))
            .await;
        self.ctx.emit(EventType::ChannelCreated, channel.id, user_id, channel).await;
        Ok(())
    }

    /// Get a channel with member count and the caller's role
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self.cached_channel(channel_id).await?;
        let member_count = self.ctx.member_repo().count(channel_id).await?;
        let my_role = ChannelAccess::new(self.ctx).role(channel_id, user_id).await?;

        Ok(ChannelResponse {
            channel,
            member_count,
            my_role,
        })
    }

    /// Read-through lookup; cache failures fall back to the store
    async fn cached_channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        let Some(cache) = self.ctx.cache() else {
            return ChannelAccess::new(self.ctx).channel(channel_id).await;
        };

        match cache.get_channel(channel_id).await {
            Ok(Some(channel)) => return Ok(channel),
            Ok(None) => {}
            Err(e) => warn!(channel_id = %channel_id, error = %e, "Channel cache read failed"),
        }

        let channel = ChannelAccess::new(self.ctx).channel(channel_id).await?;
        if let Err(e) = cache.set_channel(&channel).await {
            warn!(channel_id = %channel_id, error = %e, "Channel cache write failed");
        }
        Ok(channel)
    }

    /// Update name, description, topic or icon
    #[instrument(skip(self, request))]
    pub async fn update_channel(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: UpdateChannelRequest,
    ) -> ServiceResult<Channel> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        let mut channel = access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name != channel.name
                && self.ctx.channel_repo().name_exists(channel.workspace_id, &name).await?
            {
                return Err(DomainError::ChannelNameTaken.into());
            }
            channel.set_name(name);
        }
        if request.description.is_some() {
            channel.description = request.description;
        }
        if request.icon_url.is_some() {
            channel.icon_url = request.icon_url;
        }

        let topic_change = match request.topic {
            Some(topic) if channel.topic.as_deref() != Some(topic.as_str()) => {
                let old = channel.set_topic(Some(topic.clone()));
                Some(TopicHistory::new(self.ctx.generate_id(), channel_id, old, Some(topic), user_id))
            }
            _ => None,
        };

        self.ctx.channel_repo().update(&channel, topic_change.as_ref()).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Channel updated");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx.emit(EventType::ChannelUpdated, channel_id, user_id, &channel).await;
        Ok(channel)
    }

    /// Soft delete (owner only)
    #[instrument(skip(self))]
    pub async fn delete_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_owner(channel_id, user_id).await?;

        self.ctx.channel_repo().soft_delete(channel_id).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Channel deleted");

        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(EventType::ChannelDeleted, channel_id, user_id, &json!({ "channel_id": channel_id }))
            .await;
        Ok(())
    }

    /// Archive a channel
    pub async fn archive_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.set_archived(channel_id, user_id, true).await
    }

    /// Unarchive a channel
    pub async fn unarchive_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.set_archived(channel_id, user_id, false).await
    }

    #[instrument(skip(self))]
    async fn set_archived(&self, channel_id: Snowflake, user_id: Snowflake, archived: bool) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        self.ctx.channel_repo().set_archived(channel_id, archived).await?;

        info!(channel_id = %channel_id, user_id = %user_id, archived, "Channel archive state changed");

        let (action, event_type) = if archived {
            (actions::CHANNEL_ARCHIVED, EventType::ChannelArchived)
        } else {
            (actions::CHANNEL_UNARCHIVED, EventType::ChannelUnarchived)
        };

        self.ctx
            .record_activity(ActivityLogEntry::new(self.ctx.generate_id(), channel_id, user_id, action))
            .await;
        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(event_type, channel_id, user_id, &json!({ "channel_id": channel_id }))
            .await;
        Ok(())
    }

    /// All channels in a workspace
    #[instrument(skip(self))]
    pub async fn list_channels(&self, workspace_id: Snowflake) -> ServiceResult<Vec<Channel>> {
        Ok(self.ctx.channel_repo().list_by_workspace(workspace_id).await?)
    }

    /// Workspace channels the caller belongs to
    #[instrument(skip(self))]
    pub async fn list_user_channels(&self, workspace_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Channel>> {
        Ok(self.ctx.channel_repo().list_by_member(workspace_id, user_id).await?)
    }

    /// Match on name or description
    #[instrument(skip(self))]
    pub async fn search_channels(&self, workspace_id: Snowflake, query: &str) -> ServiceResult<Vec<Channel>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.ctx.channel_repo().search(workspace_id, query, SEARCH_LIMIT).await?)
    }

    /// Hand ownership to another member; the previous owner becomes admin
    #[instrument(skip(self))]
    pub async fn transfer_ownership(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        new_owner_id: Snowflake,
    ) -> ServiceResult<()> {
        let access = ChannelAccess::new(self.ctx);
        access.channel(channel_id).await?;
        access.require_owner(channel_id, user_id).await?;

        if new_owner_id == user_id {
            return Ok(());
        }
        if access.role(channel_id, new_owner_id).await?.is_none() {
            return Err(DomainError::NotMember.into());
        }

        self.ctx
            .member_repo()
            .transfer_ownership(channel_id, user_id, new_owner_id)
            .await?;

        info!(channel_id = %channel_id, from = %user_id, to = %new_owner_id, "Ownership transferred");

        let details = json!({ "previous_owner_id": user_id, "new_owner_id": new_owner_id });
        self.ctx
            .record_activity(
                ActivityLogEntry::new(self.ctx.generate_id(), channel_id, user_id, actions::OWNERSHIP_TRANSFERRED)
                    .with_target(new_owner_id)
                    .with_details(details.clone()),
            )
            .await;
        self.ctx.invalidate_channel(channel_id).await;
        self.ctx
            .emit(EventType::OwnershipTransferred, channel_id, user_id, &details)
            .await;
        Ok(())
    }

    /// Copy a channel's identity, and optionally its roster, pins and settings
    #[instrument(skip(self, request))]
    pub async fn clone_channel(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CloneChannelRequest,
    ) -> ServiceResult<Channel> {
        request.validate()?;

        let access = ChannelAccess::new(self.ctx);
        let source = access.channel(channel_id).await?;
        access.require_moderator(channel_id, user_id).await?;

        let clone = Channel::new(
            self.ctx.generate_id(),
            source.workspace_id,
            request.name.trim().to_string(),
            source.channel_type,
            user_id,
        )
        .with_description(source.description.clone());

        let clone_id = clone.id;
        let mut new = self.draft(clone, user_id);

        if request.include_members {
            new.members = self
                .ctx
                .member_repo()
                .list(channel_id)
                .await?
                .into_iter()
                .filter(|m| m.user_id != user_id)
                .map(|m| {
                    // The requester owns the clone; any other owner comes across as admin
                    let role = if m.role.is_owner() { MemberRole::Admin } else { m.role };
                    ChannelMember::new(self.ctx.generate_id(), clone_id, m.user_id, role)
                        .with_notifications(m.notifications)
                })
                .collect();
        }

        if request.include_pins {
            new.pins = self
                .ctx
                .pin_repo()
                .list(channel_id)
                .await?
                .into_iter()
                .map(|pin| Pin::new(self.ctx.generate_id(), clone_id, pin.message_id, pin.pinned_by))
                .collect();
        }

        if request.include_settings {
            new.settings = self
                .ctx
                .settings_repo()
                .find(channel_id)
                .await?
                .map(|settings| settings.copy_for(clone_id));
        }

        self.insert_channel(&new).await?;
        let clone = new.channel;

        self.ctx
            .emit(
                EventType::ChannelCloned,
                clone.id,
                user_id,
                &json!({ "source_channel_id": channel_id, "channel": &clone }),
            )
            .await;
        Ok(clone)
    }

    /// Member, pin and weekly-active counts
    #[instrument(skip(self))]
    pub async fn get_stats(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelStats> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.channel_repo().stats(channel_id).await?)
    }

    /// Daily active readers over the last `days` days
    #[instrument(skip(self))]
    pub async fn get_analytics(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        days: i64,
    ) -> ServiceResult<Vec<DailyActivity>> {
        ChannelAccess::new(self.ctx).require_moderator(channel_id, user_id).await?;
        Ok(self.ctx.channel_repo().daily_activity(channel_id, days.clamp(1, 365)).await?)
    }

    /// Topic changes, newest first
    #[instrument(skip(self))]
    pub async fn get_topic_history(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<TopicHistory>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.channel_repo().topic_history(channel_id, page).await?)
    }
}
