//! In-memory implementations of the repository, cache and event ports
//!
//! One `MemoryStore` backs every repository trait so a test can wire a
//! complete `ServiceContext` without external services. Uniqueness and
//! transactional rules mirror the PostgreSQL schema.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use channel_core::{
    ActivityLogEntry, ActivityLogRepository, Announcement, AnnouncementRepository, Ban, Bookmark,
    BookmarkRepository, Channel, ChannelCache, ChannelEvent, ChannelFollower, ChannelLink,
    ChannelMember, ChannelRepository, ChannelSettings, ChannelStats, ChannelTab, ChannelTemplate,
    DailyActivity, DomainError, EventPublisher, FollowerRepository, Invite, InviteRepository,
    LinkRepository, MemberRepository, MemberRole, ModerationEntry, ModerationRepository, Mute,
    NewChannel, NotificationLevel, Page, PermissionOverride, PermissionRepository, Pin, PinRepository, Poll,
    PollOption, PollRepository, PollResult, PollVote, Reaction, ReactionRepository,
    ReactionSummary, ReadReceipt, ReadReceiptRepository, RepoResult, ScheduledMessage,
    ScheduledMessageRepository, ScheduledStatus, Section, SectionRepository, SettingsRepository,
    Snowflake, SnowflakeGenerator, StarredChannel, StarredRepository, TabRepository,
    TemplateRepository, Thread, ThreadFollower, ThreadReply, ThreadRepository, TopicHistory,
    VoiceRepository, VoiceState, Webhook, WebhookRepository,
};
use channel_service::ServiceContext;

#[derive(Default)]
struct State {
    channels: Vec<Channel>,
    topic_history: Vec<TopicHistory>,
    members: Vec<ChannelMember>,
    invites: Vec<Invite>,
    bans: Vec<Ban>,
    mutes: Vec<Mute>,
    moderation_log: Vec<ModerationEntry>,
    threads: Vec<Thread>,
    replies: Vec<ThreadReply>,
    thread_followers: Vec<ThreadFollower>,
    reactions: Vec<Reaction>,
    pins: Vec<Pin>,
    bookmarks: Vec<Bookmark>,
    polls: Vec<Poll>,
    poll_options: Vec<PollOption>,
    poll_votes: Vec<PollVote>,
    webhooks: Vec<Webhook>,
    permissions: Vec<PermissionOverride>,
    settings: Vec<ChannelSettings>,
    announcements: Vec<Announcement>,
    tabs: Vec<ChannelTab>,
    sections: Vec<Section>,
    templates: Vec<ChannelTemplate>,
    scheduled: Vec<ScheduledMessage>,
    voice: Vec<VoiceState>,
    followers: Vec<ChannelFollower>,
    starred: Vec<StarredChannel>,
    receipts: Vec<ReadReceipt>,
    activity: Vec<ActivityLogEntry>,
    links: Vec<ChannelLink>,
}

/// Shared in-memory store
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn invite(&self, id: Snowflake) -> Option<Invite> {
        self.state.lock().invites.iter().find(|i| i.id == id).cloned()
    }

    pub fn scheduled_count(&self) -> usize {
        self.state.lock().scheduled.len()
    }

    pub fn activity_actions(&self, channel_id: Snowflake) -> Vec<String> {
        self.state
            .lock()
            .activity
            .iter()
            .filter(|a| a.channel_id == channel_id)
            .map(|a| a.action.clone())
            .collect()
    }

    pub fn moderation_actions(&self, channel_id: Snowflake) -> Vec<String> {
        self.state
            .lock()
            .moderation_log
            .iter()
            .filter(|e| e.channel_id == channel_id)
            .map(|e| e.action.as_str().to_string())
            .collect()
    }
}

fn page<T: Clone>(items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    items
        .skip(usize::try_from(page.offset).unwrap_or(0))
        .take(usize::try_from(page.limit).unwrap_or(0))
        .collect()
}

fn next_position(positions: impl Iterator<Item = i32>) -> i32 {
    positions.max().map_or(0, |p| p + 1)
}

// ============================================================================
// Channels and members
// ============================================================================

#[async_trait]
impl ChannelRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self
            .state
            .lock()
            .channels
            .iter()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .cloned())
    }

    async fn name_exists(&self, workspace_id: Snowflake, name: &str) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .channels
            .iter()
            .any(|c| c.workspace_id == workspace_id && c.name == name && c.deleted_at.is_none()))
    }

    async fn create(&self, new: &NewChannel) -> RepoResult<()> {
        let mut state = self.state.lock();
        let channel = &new.channel;
        if state
            .channels
            .iter()
            .any(|c| c.workspace_id == channel.workspace_id && c.name == channel.name && c.deleted_at.is_none())
        {
            return Err(DomainError::ChannelNameTaken);
        }
        // Reject before writing anything so a failed bundle leaves no rows
        for (i, pin) in new.pins.iter().enumerate() {
            if new.pins[..i].iter().any(|p| p.message_id == pin.message_id) {
                return Err(DomainError::AlreadyPinned);
            }
        }

        state.channels.push(channel.clone());
        for member in std::iter::once(&new.owner).chain(&new.members) {
            if !state
                .members
                .iter()
                .any(|m| m.channel_id == member.channel_id && m.user_id == member.user_id)
            {
                state.members.push(member.clone());
            }
        }
        state.pins.extend(new.pins.iter().cloned());
        if let Some(settings) = &new.settings {
            state.settings.retain(|s| s.channel_id != settings.channel_id);
            state.settings.push(settings.clone());
        }
        Ok(())
    }

    async fn update(&self, channel: &Channel, topic_change: Option<&TopicHistory>) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .channels
            .iter_mut()
            .find(|c| c.id == channel.id && c.deleted_at.is_none())
            .ok_or(DomainError::ChannelNotFound(channel.id))?;
        *slot = channel.clone();
        if let Some(entry) = topic_change {
            state.topic_history.push(entry.clone());
        }
        Ok(())
    }

    async fn set_archived(&self, id: Snowflake, archived: bool) -> RepoResult<()> {
        let mut state = self.state.lock();
        let channel = state
            .channels
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .ok_or(DomainError::ChannelNotFound(id))?;
        channel.is_archived = archived;
        channel.updated_at = Utc::now();
        Ok(())
    }

    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let channel = state
            .channels
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .ok_or(DomainError::ChannelNotFound(id))?;
        channel.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list_by_workspace(&self, workspace_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let mut channels: Vec<Channel> = self
            .state
            .lock()
            .channels
            .iter()
            .filter(|c| c.workspace_id == workspace_id && c.deleted_at.is_none())
            .cloned()
            .collect();
        channels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(channels)
    }

    async fn list_by_member(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let state = self.state.lock();
        let mut channels: Vec<Channel> = state
            .channels
            .iter()
            .filter(|c| c.workspace_id == workspace_id && c.deleted_at.is_none())
            .filter(|c| state.members.iter().any(|m| m.channel_id == c.id && m.user_id == user_id))
            .cloned()
            .collect();
        channels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(channels)
    }

    async fn search(&self, workspace_id: Snowflake, query: &str, limit: i64) -> RepoResult<Vec<Channel>> {
        let needle = query.to_lowercase();
        let mut channels: Vec<Channel> = self
            .state
            .lock()
            .channels
            .iter()
            .filter(|c| c.workspace_id == workspace_id && c.deleted_at.is_none())
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        channels.sort_by(|a, b| a.name.cmp(&b.name));
        channels.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(channels)
    }

    async fn stats(&self, channel_id: Snowflake) -> RepoResult<ChannelStats> {
        let state = self.state.lock();
        let week_ago = Utc::now() - Duration::days(7);
        let members: Vec<&ChannelMember> = state.members.iter().filter(|m| m.channel_id == channel_id).collect();
        Ok(ChannelStats {
            member_count: members.len() as i64,
            pin_count: state.pins.iter().filter(|p| p.channel_id == channel_id).count() as i64,
            active_members_week: members
                .iter()
                .filter(|m| m.last_read_at.is_some_and(|at| at > week_ago))
                .count() as i64,
        })
    }

    async fn daily_activity(&self, channel_id: Snowflake, days: i64) -> RepoResult<Vec<DailyActivity>> {
        let since = Utc::now() - Duration::days(days);
        let mut by_day = std::collections::BTreeMap::new();
        for member in self.state.lock().members.iter().filter(|m| m.channel_id == channel_id) {
            if let Some(at) = member.last_read_at.filter(|at| *at > since) {
                *by_day.entry(at.date_naive()).or_insert(0_i64) += 1;
            }
        }
        Ok(by_day
            .into_iter()
            .map(|(date, active_users)| DailyActivity { date, active_users })
            .collect())
    }

    async fn topic_history(&self, channel_id: Snowflake, p: Page) -> RepoResult<Vec<TopicHistory>> {
        let state = self.state.lock();
        Ok(page(
            state.topic_history.iter().rev().filter(|t| t.channel_id == channel_id).cloned(),
            p,
        ))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ChannelMember>> {
        Ok(self
            .state
            .lock()
            .members
            .iter()
            .find(|m| m.channel_id == channel_id && m.user_id == user_id)
            .cloned())
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelMember>> {
        Ok(self
            .state
            .lock()
            .members
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn count(&self, channel_id: Snowflake) -> RepoResult<i64> {
        Ok(self.state.lock().members.iter().filter(|m| m.channel_id == channel_id).count() as i64)
    }

    async fn create(&self, member: &ChannelMember) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .members
            .iter()
            .any(|m| m.channel_id == member.channel_id && m.user_id == member.user_id)
        {
            return Err(DomainError::AlreadyMember);
        }
        state.members.push(member.clone());
        Ok(())
    }

    async fn create_many(&self, members: &[ChannelMember]) -> RepoResult<Vec<Snowflake>> {
        let mut state = self.state.lock();
        let mut added = Vec::new();
        for member in members {
            if !state
                .members
                .iter()
                .any(|m| m.channel_id == member.channel_id && m.user_id == member.user_id)
            {
                state.members.push(member.clone());
                added.push(member.user_id);
            }
        }
        Ok(added)
    }

    async fn delete(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.members.len();
        state.members.retain(|m| !(m.channel_id == channel_id && m.user_id == user_id));
        if state.members.len() == before {
            return Err(DomainError::MemberNotFound);
        }
        Ok(())
    }

    async fn update_role(&self, channel_id: Snowflake, user_id: Snowflake, role: MemberRole) -> RepoResult<()> {
        let mut state = self.state.lock();
        let member = state
            .members
            .iter_mut()
            .find(|m| m.channel_id == channel_id && m.user_id == user_id)
            .ok_or(DomainError::MemberNotFound)?;
        member.role = role;
        Ok(())
    }

    async fn update_notifications(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        level: NotificationLevel,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        let member = state
            .members
            .iter_mut()
            .find(|m| m.channel_id == channel_id && m.user_id == user_id)
            .ok_or(DomainError::MemberNotFound)?;
        member.notifications = level;
        Ok(())
    }

    async fn update_last_read(&self, channel_id: Snowflake, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.state.lock();
        let member = state
            .members
            .iter_mut()
            .find(|m| m.channel_id == channel_id && m.user_id == user_id)
            .ok_or(DomainError::MemberNotFound)?;
        member.last_read_at = Some(at);
        Ok(())
    }

    async fn transfer_ownership(&self, channel_id: Snowflake, from: Snowflake, to: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.members.iter().any(|m| m.channel_id == channel_id && m.user_id == to) {
            return Err(DomainError::MemberNotFound);
        }
        for member in state.members.iter_mut().filter(|m| m.channel_id == channel_id) {
            if member.user_id == to {
                member.role = MemberRole::Owner;
            } else if member.user_id == from {
                member.role = MemberRole::Admin;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Invites and moderation
// ============================================================================

#[async_trait]
impl InviteRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invite>> {
        Ok(self.state.lock().invites.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Invite>> {
        Ok(self.state.lock().invites.iter().find(|i| i.code == code).cloned())
    }

    async fn code_exists(&self, code: &str) -> RepoResult<bool> {
        Ok(self.state.lock().invites.iter().any(|i| i.code == code))
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Invite>> {
        Ok(self
            .state
            .lock()
            .invites
            .iter()
            .filter(|i| i.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn create(&self, invite: &Invite) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.invites.iter().any(|i| i.code == invite.code) {
            return Err(DomainError::InviteCodeExists);
        }
        state.invites.push(invite.clone());
        Ok(())
    }

    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let invite = state
            .invites
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::InviteNotFound)?;
        invite.is_active = false;
        Ok(())
    }

    async fn redeem(&self, invite_id: Snowflake, member: &ChannelMember) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .members
            .iter()
            .any(|m| m.channel_id == member.channel_id && m.user_id == member.user_id)
        {
            return Err(DomainError::AlreadyMember);
        }
        let invite = state
            .invites
            .iter_mut()
            .find(|i| i.id == invite_id && i.is_active && !i.is_exhausted())
            .ok_or(DomainError::InviteMaxUses)?;
        invite.use_count += 1;
        state.members.push(member.clone());
        Ok(())
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut count = 0;
        for invite in self.state.lock().invites.iter_mut() {
            if invite.is_active && invite.is_expired_at(now) {
                invite.is_active = false;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl ModerationRepository for MemoryStore {
    async fn find_ban(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Ban>> {
        Ok(self
            .state
            .lock()
            .bans
            .iter()
            .find(|b| b.channel_id == channel_id && b.user_id == user_id)
            .cloned())
    }

    async fn find_mute(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Mute>> {
        Ok(self
            .state
            .lock()
            .mutes
            .iter()
            .find(|m| m.channel_id == channel_id && m.user_id == user_id)
            .cloned())
    }

    async fn is_banned(&self, channel_id: Snowflake, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .bans
            .iter()
            .any(|b| b.channel_id == channel_id && b.user_id == user_id && b.is_active_at(now)))
    }

    async fn is_muted(&self, channel_id: Snowflake, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .mutes
            .iter()
            .any(|m| m.channel_id == channel_id && m.user_id == user_id && m.is_active_at(now)))
    }

    async fn ban(&self, ban: &Ban, log: &ModerationEntry) -> RepoResult<()> {
        let mut state = self.state.lock();
        state
            .bans
            .retain(|b| !(b.channel_id == ban.channel_id && b.user_id == ban.user_id));
        state.bans.push(ban.clone());
        state
            .members
            .retain(|m| !(m.channel_id == ban.channel_id && m.user_id == ban.user_id));
        state.moderation_log.push(log.clone());
        Ok(())
    }

    async fn unban(&self, channel_id: Snowflake, user_id: Snowflake, log: &ModerationEntry) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.bans.len();
        state.bans.retain(|b| !(b.channel_id == channel_id && b.user_id == user_id));
        if state.bans.len() == before {
            return Err(DomainError::BanNotFound);
        }
        state.moderation_log.push(log.clone());
        Ok(())
    }

    async fn mute(&self, mute: &Mute, log: &ModerationEntry) -> RepoResult<()> {
        let mut state = self.state.lock();
        state
            .mutes
            .retain(|m| !(m.channel_id == mute.channel_id && m.user_id == mute.user_id));
        state.mutes.push(mute.clone());
        state.moderation_log.push(log.clone());
        Ok(())
    }

    async fn unmute(&self, channel_id: Snowflake, user_id: Snowflake, log: &ModerationEntry) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.mutes.len();
        state.mutes.retain(|m| !(m.channel_id == channel_id && m.user_id == user_id));
        if state.mutes.len() == before {
            return Err(DomainError::MuteNotFound);
        }
        state.moderation_log.push(log.clone());
        Ok(())
    }

    async fn list_bans(&self, channel_id: Snowflake) -> RepoResult<Vec<Ban>> {
        Ok(self
            .state
            .lock()
            .bans
            .iter()
            .filter(|b| b.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn list_mutes(&self, channel_id: Snowflake) -> RepoResult<Vec<Mute>> {
        Ok(self
            .state
            .lock()
            .mutes
            .iter()
            .rev()
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn history(&self, channel_id: Snowflake, p: Page) -> RepoResult<Vec<ModerationEntry>> {
        let state = self.state.lock();
        Ok(page(
            state.moderation_log.iter().rev().filter(|e| e.channel_id == channel_id).cloned(),
            p,
        ))
    }
}

// ============================================================================
// Threads
// ============================================================================

#[async_trait]
impl ThreadRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Thread>> {
        Ok(self.state.lock().threads.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, channel_id: Snowflake, p: Page) -> RepoResult<Vec<Thread>> {
        let state = self.state.lock();
        Ok(page(
            state.threads.iter().rev().filter(|t| t.channel_id == channel_id).cloned(),
            p,
        ))
    }

    async fn create(&self, thread: &Thread, follower: &ThreadFollower) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.threads.push(thread.clone());
        state.thread_followers.push(follower.clone());
        Ok(())
    }

    async fn update(&self, thread: &Thread) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .threads
            .iter_mut()
            .find(|t| t.id == thread.id)
            .ok_or(DomainError::ThreadNotFound(thread.id))?;
        *slot = thread.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.threads.retain(|t| t.id != id);
        state.replies.retain(|r| r.thread_id != id);
        state.thread_followers.retain(|f| f.thread_id != id);
        Ok(())
    }

    async fn find_reply(&self, id: Snowflake) -> RepoResult<Option<ThreadReply>> {
        Ok(self.state.lock().replies.iter().find(|r| r.id == id).cloned())
    }

    async fn list_replies(&self, thread_id: Snowflake, p: Page) -> RepoResult<Vec<ThreadReply>> {
        let state = self.state.lock();
        Ok(page(
            state.replies.iter().filter(|r| r.thread_id == thread_id).cloned(),
            p,
        ))
    }

    async fn create_reply(&self, reply: &ThreadReply) -> RepoResult<()> {
        let mut state = self.state.lock();
        let thread = state
            .threads
            .iter_mut()
            .find(|t| t.id == reply.thread_id)
            .ok_or(DomainError::ThreadNotFound(reply.thread_id))?;
        thread.reply_count += 1;
        thread.last_reply_at = Some(reply.created_at);
        state.replies.push(reply.clone());
        Ok(())
    }

    async fn update_reply(&self, reply: &ThreadReply) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .replies
            .iter_mut()
            .find(|r| r.id == reply.id)
            .ok_or(DomainError::ReplyNotFound)?;
        *slot = reply.clone();
        Ok(())
    }

    async fn delete_reply(&self, thread_id: Snowflake, reply_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.replies.len();
        state.replies.retain(|r| !(r.id == reply_id && r.thread_id == thread_id));
        if state.replies.len() == before {
            return Err(DomainError::ReplyNotFound);
        }
        if let Some(thread) = state.threads.iter_mut().find(|t| t.id == thread_id) {
            thread.reply_count = (thread.reply_count - 1).max(0);
        }
        Ok(())
    }

    async fn find_follower(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ThreadFollower>> {
        Ok(self
            .state
            .lock()
            .thread_followers
            .iter()
            .find(|f| f.thread_id == thread_id && f.user_id == user_id)
            .cloned())
    }

    async fn add_follower(&self, follower: &ThreadFollower) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .thread_followers
            .iter()
            .any(|f| f.thread_id == follower.thread_id && f.user_id == follower.user_id)
        {
            return Err(DomainError::AlreadyFollowingThread);
        }
        state.thread_followers.push(follower.clone());
        Ok(())
    }

    async fn remove_follower(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        self.state
            .lock()
            .thread_followers
            .retain(|f| !(f.thread_id == thread_id && f.user_id == user_id));
        Ok(())
    }
}

// ============================================================================
// Reactions, pins, bookmarks
// ============================================================================

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .state
            .lock()
            .reactions
            .iter()
            .find(|r| r.channel_id == channel_id && r.message_id == message_id && r.user_id == user_id && r.is_emoji(emoji))
            .cloned())
    }

    async fn list_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        Ok(self
            .state
            .lock()
            .reactions
            .iter()
            .filter(|r| r.channel_id == channel_id && r.message_id == message_id)
            .cloned()
            .collect())
    }

    async fn summary(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<ReactionSummary>> {
        let mut counts = std::collections::BTreeMap::new();
        for reaction in self
            .state
            .lock()
            .reactions
            .iter()
            .filter(|r| r.channel_id == channel_id && r.message_id == message_id)
        {
            *counts.entry(reaction.emoji.clone()).or_insert(0_i64) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(emoji, count)| ReactionSummary::new(emoji, count))
            .collect())
    }

    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.reactions.iter().any(|r| {
            r.channel_id == reaction.channel_id
                && r.message_id == reaction.message_id
                && r.user_id == reaction.user_id
                && r.emoji == reaction.emoji
        }) {
            return Err(DomainError::ReactionExists);
        }
        state.reactions.push(reaction.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().reactions.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl PinRepository for MemoryStore {
    async fn find(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Option<Pin>> {
        Ok(self
            .state
            .lock()
            .pins
            .iter()
            .find(|p| p.channel_id == channel_id && p.message_id == message_id)
            .cloned())
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Pin>> {
        Ok(self
            .state
            .lock()
            .pins
            .iter()
            .rev()
            .filter(|p| p.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn create(&self, pin: &Pin) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .pins
            .iter()
            .any(|p| p.channel_id == pin.channel_id && p.message_id == pin.message_id)
        {
            return Err(DomainError::AlreadyPinned);
        }
        state.pins.push(pin.clone());
        Ok(())
    }

    async fn delete(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()> {
        self.state
            .lock()
            .pins
            .retain(|p| !(p.channel_id == channel_id && p.message_id == message_id));
        Ok(())
    }
}

#[async_trait]
impl BookmarkRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Bookmark>> {
        Ok(self.state.lock().bookmarks.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Bookmark>> {
        let mut bookmarks: Vec<Bookmark> = self
            .state
            .lock()
            .bookmarks
            .iter()
            .filter(|b| b.channel_id == channel_id && b.user_id == user_id)
            .cloned()
            .collect();
        bookmarks.sort_by_key(|b| b.position);
        Ok(bookmarks)
    }

    async fn count(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .state
            .lock()
            .bookmarks
            .iter()
            .filter(|b| b.channel_id == channel_id && b.user_id == user_id)
            .count() as i64)
    }

    async fn next_position(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<i32> {
        Ok(next_position(
            self.state
                .lock()
                .bookmarks
                .iter()
                .filter(|b| b.channel_id == channel_id && b.user_id == user_id)
                .map(|b| b.position),
        ))
    }

    async fn create(&self, bookmark: &Bookmark) -> RepoResult<()> {
        self.state.lock().bookmarks.push(bookmark.clone());
        Ok(())
    }

    async fn update(&self, bookmark: &Bookmark) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .bookmarks
            .iter_mut()
            .find(|b| b.id == bookmark.id)
            .ok_or(DomainError::BookmarkNotFound)?;
        *slot = bookmark.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().bookmarks.retain(|b| b.id != id);
        Ok(())
    }
}

// ============================================================================
// Polls
// ============================================================================

#[async_trait]
impl PollRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Poll>> {
        Ok(self.state.lock().polls.iter().find(|p| p.id == id).cloned())
    }

    async fn options(&self, poll_id: Snowflake) -> RepoResult<Vec<PollOption>> {
        let mut options: Vec<PollOption> = self
            .state
            .lock()
            .poll_options
            .iter()
            .filter(|o| o.poll_id == poll_id)
            .cloned()
            .collect();
        options.sort_by_key(|o| o.position);
        Ok(options)
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Poll>> {
        Ok(self
            .state
            .lock()
            .polls
            .iter()
            .rev()
            .filter(|p| p.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn create(&self, poll: &Poll, options: &[PollOption]) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.polls.push(poll.clone());
        state.poll_options.extend_from_slice(options);
        Ok(())
    }

    async fn has_voted(&self, poll_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .poll_votes
            .iter()
            .any(|v| v.poll_id == poll_id && v.user_id == user_id))
    }

    async fn cast_votes(&self, votes: &[PollVote]) -> RepoResult<()> {
        let mut state = self.state.lock();
        for vote in votes {
            if state
                .poll_votes
                .iter()
                .any(|v| v.poll_id == vote.poll_id && v.option_id == vote.option_id && v.user_id == vote.user_id)
            {
                return Err(DomainError::AlreadyVoted);
            }
        }
        state.poll_votes.extend_from_slice(votes);
        Ok(())
    }

    async fn close(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.state.lock();
        let poll = state
            .polls
            .iter_mut()
            .find(|p| p.id == id && !p.is_closed)
            .ok_or(DomainError::PollClosed)?;
        poll.is_closed = true;
        poll.closed_at = Some(at);
        Ok(())
    }

    async fn results(&self, poll_id: Snowflake) -> RepoResult<Vec<PollResult>> {
        let state = self.state.lock();
        let mut options: Vec<&PollOption> = state.poll_options.iter().filter(|o| o.poll_id == poll_id).collect();
        options.sort_by_key(|o| o.position);
        Ok(options
            .into_iter()
            .map(|o| PollResult {
                option_id: o.id,
                option_text: o.text.clone(),
                vote_count: state.poll_votes.iter().filter(|v| v.option_id == o.id).count() as i64,
            })
            .collect())
    }
}

// ============================================================================
// Webhooks, permissions, settings, announcements
// ============================================================================

#[async_trait]
impl WebhookRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Webhook>> {
        Ok(self.state.lock().webhooks.iter().find(|w| w.id == id).cloned())
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Webhook>> {
        Ok(self
            .state
            .lock()
            .webhooks
            .iter()
            .filter(|w| w.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn create(&self, webhook: &Webhook) -> RepoResult<()> {
        self.state.lock().webhooks.push(webhook.clone());
        Ok(())
    }

    async fn update(&self, webhook: &Webhook) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .webhooks
            .iter_mut()
            .find(|w| w.id == webhook.id)
            .ok_or(DomainError::WebhookNotFound)?;
        *slot = webhook.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().webhooks.retain(|w| w.id != id);
        Ok(())
    }

    async fn touch(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.state.lock();
        let webhook = state
            .webhooks
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(DomainError::WebhookNotFound)?;
        webhook.last_triggered_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl PermissionRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<PermissionOverride>> {
        Ok(self.state.lock().permissions.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<PermissionOverride>> {
        Ok(self
            .state
            .lock()
            .permissions
            .iter()
            .filter(|p| p.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, permission: &PermissionOverride) -> RepoResult<PermissionOverride> {
        let mut state = self.state.lock();
        if let Some(existing) = state.permissions.iter_mut().find(|p| {
            p.channel_id == permission.channel_id
                && p.permission_type == permission.permission_type
                && p.target_type == permission.target_type
                && p.target_id == permission.target_id
        }) {
            existing.allow = permission.allow;
            existing.deny = permission.deny;
            existing.updated_at = permission.updated_at;
            return Ok(existing.clone());
        }
        state.permissions.push(permission.clone());
        Ok(permission.clone())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().permissions.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn find(&self, channel_id: Snowflake) -> RepoResult<Option<ChannelSettings>> {
        Ok(self
            .state
            .lock()
            .settings
            .iter()
            .find(|s| s.channel_id == channel_id)
            .cloned())
    }

    async fn upsert(&self, settings: &ChannelSettings) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.settings.retain(|s| s.channel_id != settings.channel_id);
        state.settings.push(settings.clone());
        Ok(())
    }
}

#[async_trait]
impl AnnouncementRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Announcement>> {
        Ok(self.state.lock().announcements.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Announcement>> {
        let mut announcements: Vec<Announcement> = self
            .state
            .lock()
            .announcements
            .iter()
            .filter(|a| a.channel_id == channel_id)
            .cloned()
            .collect();
        announcements.sort_by(|a, b| b.is_pinned.cmp(&a.is_pinned).then(b.created_at.cmp(&a.created_at)));
        Ok(announcements)
    }

    async fn create(&self, announcement: &Announcement) -> RepoResult<()> {
        self.state.lock().announcements.push(announcement.clone());
        Ok(())
    }

    async fn update(&self, announcement: &Announcement) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .announcements
            .iter_mut()
            .find(|a| a.id == announcement.id)
            .ok_or(DomainError::AnnouncementNotFound)?;
        *slot = announcement.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().announcements.retain(|a| a.id != id);
        Ok(())
    }
}

// ============================================================================
// Tabs, sections, templates
// ============================================================================

#[async_trait]
impl TabRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelTab>> {
        Ok(self.state.lock().tabs.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelTab>> {
        let mut tabs: Vec<ChannelTab> = self
            .state
            .lock()
            .tabs
            .iter()
            .filter(|t| t.channel_id == channel_id)
            .cloned()
            .collect();
        tabs.sort_by_key(|t| t.position);
        Ok(tabs)
    }

    async fn next_position(&self, channel_id: Snowflake) -> RepoResult<i32> {
        Ok(next_position(
            self.state
                .lock()
                .tabs
                .iter()
                .filter(|t| t.channel_id == channel_id)
                .map(|t| t.position),
        ))
    }

    async fn create(&self, tab: &ChannelTab) -> RepoResult<()> {
        self.state.lock().tabs.push(tab.clone());
        Ok(())
    }

    async fn update(&self, tab: &ChannelTab) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .tabs
            .iter_mut()
            .find(|t| t.id == tab.id)
            .ok_or(DomainError::TabNotFound)?;
        *slot = tab.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().tabs.retain(|t| t.id != id);
        Ok(())
    }

    async fn reorder(&self, channel_id: Snowflake, tab_ids: &[Snowflake]) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !tab_ids
            .iter()
            .all(|id| state.tabs.iter().any(|t| t.id == *id && t.channel_id == channel_id))
        {
            return Err(DomainError::TabNotFound);
        }
        for (position, id) in tab_ids.iter().enumerate() {
            if let Some(tab) = state.tabs.iter_mut().find(|t| t.id == *id) {
                tab.position = position as i32;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SectionRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Section>> {
        Ok(self.state.lock().sections.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<Section>> {
        let mut sections: Vec<Section> = self
            .state
            .lock()
            .sections
            .iter()
            .filter(|s| s.workspace_id == workspace_id && s.user_id == user_id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.position);
        Ok(sections)
    }

    async fn next_position(&self, workspace_id: Snowflake, user_id: Snowflake) -> RepoResult<i32> {
        Ok(next_position(
            self.state
                .lock()
                .sections
                .iter()
                .filter(|s| s.workspace_id == workspace_id && s.user_id == user_id)
                .map(|s| s.position),
        ))
    }

    async fn create(&self, section: &Section) -> RepoResult<()> {
        self.state.lock().sections.push(section.clone());
        Ok(())
    }

    async fn update(&self, section: &Section) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .sections
            .iter_mut()
            .find(|s| s.id == section.id)
            .ok_or(DomainError::SectionNotFound)?;
        *slot = section.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().sections.retain(|s| s.id != id);
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelTemplate>> {
        Ok(self.state.lock().templates.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, workspace_id: Snowflake) -> RepoResult<Vec<ChannelTemplate>> {
        let mut templates: Vec<ChannelTemplate> = self
            .state
            .lock()
            .templates
            .iter()
            .filter(|t| t.workspace_id == workspace_id)
            .cloned()
            .collect();
        templates.sort_by(|a, b| b.use_count.cmp(&a.use_count).then(a.name.cmp(&b.name)));
        Ok(templates)
    }

    async fn create(&self, template: &ChannelTemplate) -> RepoResult<()> {
        self.state.lock().templates.push(template.clone());
        Ok(())
    }

    async fn update(&self, template: &ChannelTemplate) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .templates
            .iter_mut()
            .find(|t| t.id == template.id)
            .ok_or(DomainError::TemplateNotFound)?;
        *slot = template.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state.lock().templates.retain(|t| t.id != id);
        Ok(())
    }

    async fn increment_use(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let template = state
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DomainError::TemplateNotFound)?;
        template.use_count += 1;
        Ok(())
    }
}

// ============================================================================
// Scheduled messages, voice, followers, starred, receipts
// ============================================================================

#[async_trait]
impl ScheduledMessageRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ScheduledMessage>> {
        Ok(self.state.lock().scheduled.iter().find(|m| m.id == id).cloned())
    }

    async fn list_by_channel(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Vec<ScheduledMessage>> {
        let mut messages: Vec<ScheduledMessage> = self
            .state
            .lock()
            .scheduled
            .iter()
            .filter(|m| m.channel_id == channel_id && m.user_id == user_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.scheduled_at);
        Ok(messages)
    }

    async fn list_pending_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<ScheduledMessage>> {
        let mut messages: Vec<ScheduledMessage> = self
            .state
            .lock()
            .scheduled
            .iter()
            .filter(|m| m.user_id == user_id && m.status == ScheduledStatus::Pending)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.scheduled_at);
        Ok(messages)
    }

    async fn create(&self, message: &ScheduledMessage) -> RepoResult<()> {
        self.state.lock().scheduled.push(message.clone());
        Ok(())
    }

    async fn update(&self, message: &ScheduledMessage) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .scheduled
            .iter_mut()
            .find(|m| m.id == message.id)
            .ok_or(DomainError::ScheduledMessageNotFound)?;
        *slot = message.clone();
        Ok(())
    }

    async fn pending_before(&self, before: DateTime<Utc>, limit: i64) -> RepoResult<Vec<ScheduledMessage>> {
        let mut messages: Vec<ScheduledMessage> = self
            .state
            .lock()
            .scheduled
            .iter()
            .filter(|m| m.status == ScheduledStatus::Pending && m.scheduled_at <= before)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.scheduled_at);
        messages.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(messages)
    }
}

#[async_trait]
impl VoiceRepository for MemoryStore {
    async fn find_active(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<VoiceState>> {
        Ok(self
            .state
            .lock()
            .voice
            .iter()
            .find(|v| v.channel_id == channel_id && v.user_id == user_id && v.is_connected())
            .cloned())
    }

    async fn list_active(&self, channel_id: Snowflake) -> RepoResult<Vec<VoiceState>> {
        Ok(self
            .state
            .lock()
            .voice
            .iter()
            .filter(|v| v.channel_id == channel_id && v.is_connected())
            .cloned()
            .collect())
    }

    async fn count_active(&self, channel_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .state
            .lock()
            .voice
            .iter()
            .filter(|v| v.channel_id == channel_id && v.is_connected())
            .count() as i64)
    }

    async fn create(&self, state: &VoiceState) -> RepoResult<()> {
        self.state.lock().voice.push(state.clone());
        Ok(())
    }

    async fn update_flags(&self, voice: &VoiceState) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .voice
            .iter_mut()
            .find(|v| v.id == voice.id && v.is_connected())
            .ok_or(DomainError::NotInVoice)?;
        *slot = voice.clone();
        Ok(())
    }

    async fn disconnect(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.state.lock();
        let voice = state
            .voice
            .iter_mut()
            .find(|v| v.id == id && v.is_connected())
            .ok_or(DomainError::NotInVoice)?;
        voice.disconnected_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl FollowerRepository for MemoryStore {
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ChannelFollower>> {
        Ok(self
            .state
            .lock()
            .followers
            .iter()
            .find(|f| f.channel_id == channel_id && f.user_id == user_id)
            .cloned())
    }

    async fn create(&self, follower: &ChannelFollower) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .followers
            .iter()
            .any(|f| f.channel_id == follower.channel_id && f.user_id == follower.user_id)
        {
            return Err(DomainError::AlreadyFollowing);
        }
        state.followers.push(follower.clone());
        Ok(())
    }

    async fn delete(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        self.state
            .lock()
            .followers
            .retain(|f| !(f.channel_id == channel_id && f.user_id == user_id));
        Ok(())
    }

    async fn list(&self, channel_id: Snowflake, p: Page) -> RepoResult<Vec<ChannelFollower>> {
        let state = self.state.lock();
        Ok(page(
            state.followers.iter().rev().filter(|f| f.channel_id == channel_id).cloned(),
            p,
        ))
    }

    async fn count(&self, channel_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .state
            .lock()
            .followers
            .iter()
            .filter(|f| f.channel_id == channel_id)
            .count() as i64)
    }

    async fn list_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .state
            .lock()
            .followers
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .map(|f| f.channel_id)
            .collect())
    }
}

#[async_trait]
impl StarredRepository for MemoryStore {
    async fn find(&self, user_id: Snowflake, channel_id: Snowflake) -> RepoResult<Option<StarredChannel>> {
        Ok(self
            .state
            .lock()
            .starred
            .iter()
            .find(|s| s.user_id == user_id && s.channel_id == channel_id)
            .cloned())
    }

    async fn next_position(&self, user_id: Snowflake) -> RepoResult<i32> {
        Ok(next_position(
            self.state
                .lock()
                .starred
                .iter()
                .filter(|s| s.user_id == user_id)
                .map(|s| s.position),
        ))
    }

    async fn create(&self, starred: &StarredChannel) -> RepoResult<()> {
        self.state.lock().starred.push(starred.clone());
        Ok(())
    }

    async fn delete(&self, user_id: Snowflake, channel_id: Snowflake) -> RepoResult<()> {
        self.state
            .lock()
            .starred
            .retain(|s| !(s.user_id == user_id && s.channel_id == channel_id));
        Ok(())
    }

    async fn list(&self, user_id: Snowflake) -> RepoResult<Vec<StarredChannel>> {
        let mut starred: Vec<StarredChannel> = self
            .state
            .lock()
            .starred
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        starred.sort_by_key(|s| s.position);
        Ok(starred)
    }
}

#[async_trait]
impl ReadReceiptRepository for MemoryStore {
    async fn upsert(&self, receipt: &ReadReceipt) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.receipts.retain(|r| {
            !(r.channel_id == receipt.channel_id && r.user_id == receipt.user_id && r.message_id == receipt.message_id)
        });
        state.receipts.push(receipt.clone());
        Ok(())
    }

    async fn list_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<Vec<ReadReceipt>> {
        Ok(self
            .state
            .lock()
            .receipts
            .iter()
            .filter(|r| r.channel_id == channel_id && r.message_id == message_id)
            .cloned()
            .collect())
    }

    async fn count_by_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .state
            .lock()
            .receipts
            .iter()
            .filter(|r| r.channel_id == channel_id && r.message_id == message_id)
            .count() as i64)
    }
}

#[async_trait]
impl ActivityLogRepository for MemoryStore {
    async fn create(&self, entry: &ActivityLogEntry) -> RepoResult<()> {
        self.state.lock().activity.push(entry.clone());
        Ok(())
    }

    async fn list_by_channel(&self, channel_id: Snowflake, p: Page) -> RepoResult<Vec<ActivityLogEntry>> {
        let state = self.state.lock();
        Ok(page(
            state.activity.iter().rev().filter(|a| a.channel_id == channel_id).cloned(),
            p,
        ))
    }

    async fn list_by_user(&self, user_id: Snowflake, p: Page) -> RepoResult<Vec<ActivityLogEntry>> {
        let state = self.state.lock();
        Ok(page(
            state.activity.iter().rev().filter(|a| a.user_id == user_id).cloned(),
            p,
        ))
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn find(&self, id: Snowflake) -> RepoResult<Option<ChannelLink>> {
        Ok(self.state.lock().links.iter().find(|l| l.id == id).cloned())
    }

    async fn list_active(&self, channel_id: Snowflake) -> RepoResult<Vec<ChannelLink>> {
        Ok(self
            .state
            .lock()
            .links
            .iter()
            .filter(|l| l.is_active && l.involves(channel_id))
            .cloned()
            .collect())
    }

    async fn create(&self, link: &ChannelLink) -> RepoResult<()> {
        self.state.lock().links.push(link.clone());
        Ok(())
    }

    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let link = state
            .links
            .iter_mut()
            .find(|l| l.id == id && l.is_active)
            .ok_or(DomainError::LinkNotFound)?;
        link.is_active = false;
        Ok(())
    }
}

// ============================================================================
// Cache and events
// ============================================================================

/// Cache fake; typing entries never expire
#[derive(Default)]
pub struct MemoryCache {
    channels: Mutex<Vec<Channel>>,
    typing: Mutex<Vec<(Snowflake, Snowflake)>>,
}

impl MemoryCache {
    pub fn is_cached(&self, id: Snowflake) -> bool {
        self.channels.lock().iter().any(|c| c.id == id)
    }
}

#[async_trait]
impl ChannelCache for MemoryCache {
    async fn get_channel(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self.channels.lock().iter().find(|c| c.id == id).cloned())
    }

    async fn set_channel(&self, channel: &Channel) -> RepoResult<()> {
        let mut channels = self.channels.lock();
        channels.retain(|c| c.id != channel.id);
        channels.push(channel.clone());
        Ok(())
    }

    async fn invalidate_channel(&self, id: Snowflake) -> RepoResult<()> {
        self.channels.lock().retain(|c| c.id != id);
        Ok(())
    }

    async fn set_typing(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut typing = self.typing.lock();
        if !typing.contains(&(channel_id, user_id)) {
            typing.push((channel_id, user_id));
        }
        Ok(())
    }

    async fn typing_users(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .typing
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel_id)
            .map(|(_, u)| *u)
            .collect())
    }
}

/// Publisher that records events, or fails every publish
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ChannelEvent>>,
    failing: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            events: Mutex::default(),
            failing: true,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.name().to_string()).collect()
    }

    /// Payload of the latest event with this name
    pub fn data(&self, name: &str) -> Option<serde_json::Value> {
        self.events
            .lock()
            .iter()
            .rev()
            .find(|e| e.name() == name)
            .map(|e| e.data.clone())
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &ChannelEvent) -> RepoResult<()> {
        if self.failing {
            return Err(DomainError::CacheError("publisher offline".to_string()));
        }
        self.events.lock().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Context wiring
// ============================================================================

/// Everything a service test needs
pub struct Harness {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCache>,
    pub events: Arc<RecordingPublisher>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_publisher(RecordingPublisher::default())
    }

    pub fn with_publisher(publisher: RecordingPublisher) -> Self {
        let store = MemoryStore::new();
        let cache = Arc::new(MemoryCache::default());
        let events = Arc::new(publisher);

        let ctx = ServiceContext::builder()
            .channel_repo(store.clone())
            .member_repo(store.clone())
            .invite_repo(store.clone())
            .moderation_repo(store.clone())
            .thread_repo(store.clone())
            .reaction_repo(store.clone())
            .pin_repo(store.clone())
            .bookmark_repo(store.clone())
            .poll_repo(store.clone())
            .webhook_repo(store.clone())
            .permission_repo(store.clone())
            .settings_repo(store.clone())
            .announcement_repo(store.clone())
            .tab_repo(store.clone())
            .section_repo(store.clone())
            .template_repo(store.clone())
            .scheduled_repo(store.clone())
            .voice_repo(store.clone())
            .follower_repo(store.clone())
            .starred_repo(store.clone())
            .read_receipt_repo(store.clone())
            .activity_repo(store.clone())
            .link_repo(store.clone())
            .cache(cache.clone())
            .publisher(events.clone())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .expect("complete context");

        Self {
            ctx,
            store,
            cache,
            events,
        }
    }
}

/// Fixed external ids
pub const WORKSPACE: Snowflake = Snowflake::new(100);
pub const OWNER: Snowflake = Snowflake::new(1);
pub const ALICE: Snowflake = Snowflake::new(2);
pub const BOB: Snowflake = Snowflake::new(3);
pub const CAROL: Snowflake = Snowflake::new(4);
pub const MESSAGE: Snowflake = Snowflake::new(900);
