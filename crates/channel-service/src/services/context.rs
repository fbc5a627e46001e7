//! Service context - dependency container for services
//!
//! Holds every repository, the optional channel cache and event publisher,
//! and the Snowflake generator.

use std::sync::Arc;

use channel_core::traits::{
    ActivityLogRepository, AnnouncementRepository, BookmarkRepository, ChannelCache, ChannelRepository,
    EventPublisher, FollowerRepository, InviteRepository, LinkRepository, MemberRepository,
    ModerationRepository, PermissionRepository, PinRepository, PollRepository, ReactionRepository,
    ReadReceiptRepository, ScheduledMessageRepository, SectionRepository, SettingsRepository,
    StarredRepository, TabRepository, TemplateRepository, ThreadRepository, VoiceRepository,
    WebhookRepository,
};
use channel_core::{Snowflake, SnowflakeGenerator};
use channel_db::{
    PgActivityLogRepository, PgAnnouncementRepository, PgBookmarkRepository, PgChannelRepository,
    PgFollowerRepository, PgInviteRepository, PgLinkRepository, PgMemberRepository,
    PgModerationRepository, PgPermissionRepository, PgPinRepository, PgPollRepository, PgPool,
    PgReactionRepository, PgReadReceiptRepository, PgScheduledMessageRepository, PgSectionRepository,
    PgSettingsRepository, PgStarredRepository, PgTabRepository, PgTemplateRepository,
    PgThreadRepository, PgVoiceRepository, PgWebhookRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Cache and publisher are optional; without them the read-through cache,
/// typing presence and event publication become no-ops.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    channel_repo: Arc<dyn ChannelRepository>,
    member_repo: Arc<dyn MemberRepository>,
    invite_repo: Arc<dyn InviteRepository>,
    moderation_repo: Arc<dyn ModerationRepository>,
    thread_repo: Arc<dyn ThreadRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    pin_repo: Arc<dyn PinRepository>,
    bookmark_repo: Arc<dyn BookmarkRepository>,
    poll_repo: Arc<dyn PollRepository>,
    webhook_repo: Arc<dyn WebhookRepository>,
    permission_repo: Arc<dyn PermissionRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    announcement_repo: Arc<dyn AnnouncementRepository>,
    tab_repo: Arc<dyn TabRepository>,
    section_repo: Arc<dyn SectionRepository>,
    template_repo: Arc<dyn TemplateRepository>,
    scheduled_repo: Arc<dyn ScheduledMessageRepository>,
    voice_repo: Arc<dyn VoiceRepository>,
    follower_repo: Arc<dyn FollowerRepository>,
    starred_repo: Arc<dyn StarredRepository>,
    read_receipt_repo: Arc<dyn ReadReceiptRepository>,
    activity_repo: Arc<dyn ActivityLogRepository>,
    link_repo: Arc<dyn LinkRepository>,

    // Optional infrastructure
    cache: Option<Arc<dyn ChannelCache>>,
    publisher: Option<Arc<dyn EventPublisher>>,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the invite repository
    pub fn invite_repo(&self) -> &dyn InviteRepository {
        self.invite_repo.as_ref()
    }

    /// Get the moderation repository
    pub fn moderation_repo(&self) -> &dyn ModerationRepository {
        self.moderation_repo.as_ref()
    }

    /// Get the thread repository
    pub fn thread_repo(&self) -> &dyn ThreadRepository {
        self.thread_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the pin repository
    pub fn pin_repo(&self) -> &dyn PinRepository {
        self.pin_repo.as_ref()
    }

    /// Get the bookmark repository
    pub fn bookmark_repo(&self) -> &dyn BookmarkRepository {
        self.bookmark_repo.as_ref()
    }

    /// Get the poll repository
    pub fn poll_repo(&self) -> &dyn PollRepository {
        self.poll_repo.as_ref()
    }

    /// Get the webhook repository
    pub fn webhook_repo(&self) -> &dyn WebhookRepository {
        self.webhook_repo.as_ref()
    }

    /// Get the permission override repository
    pub fn permission_repo(&self) -> &dyn PermissionRepository {
        self.permission_repo.as_ref()
    }

    /// Get the settings repository
    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.settings_repo.as_ref()
    }

    /// Get the announcement repository
    pub fn announcement_repo(&self) -> &dyn AnnouncementRepository {
        self.announcement_repo.as_ref()
    }

    /// Get the tab repository
    pub fn tab_repo(&self) -> &dyn TabRepository {
        self.tab_repo.as_ref()
    }

    /// Get the section repository
    pub fn section_repo(&self) -> &dyn SectionRepository {
        self.section_repo.as_ref()
    }

    /// Get the template repository
    pub fn template_repo(&self) -> &dyn TemplateRepository {
        self.template_repo.as_ref()
    }

    /// Get the scheduled message repository
    pub fn scheduled_repo(&self) -> &dyn ScheduledMessageRepository {
        self.scheduled_repo.as_ref()
    }

    /// Get the voice state repository
    pub fn voice_repo(&self) -> &dyn VoiceRepository {
        self.voice_repo.as_ref()
    }

    /// Get the channel follower repository
    pub fn follower_repo(&self) -> &dyn FollowerRepository {
        self.follower_repo.as_ref()
    }

    /// Get the starred channel repository
    pub fn starred_repo(&self) -> &dyn StarredRepository {
        self.starred_repo.as_ref()
    }

    /// Get the read receipt repository
    pub fn read_receipt_repo(&self) -> &dyn ReadReceiptRepository {
        self.read_receipt_repo.as_ref()
    }

    /// Get the activity log repository
    pub fn activity_repo(&self) -> &dyn ActivityLogRepository {
        self.activity_repo.as_ref()
    }

    /// Get the channel link repository
    pub fn link_repo(&self) -> &dyn LinkRepository {
        self.link_repo.as_ref()
    }

    // === Optional infrastructure ===

    /// Get the channel cache, if configured
    pub fn cache(&self) -> Option<&dyn ChannelCache> {
        self.cache.as_deref()
    }

    /// Get the event publisher, if configured
    pub fn publisher(&self) -> Option<&dyn EventPublisher> {
        self.publisher.as_deref()
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("cache", &self.cache.is_some())
            .field("publisher", &self.publisher.is_some())
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    invite_repo: Option<Arc<dyn InviteRepository>>,
    moderation_repo: Option<Arc<dyn ModerationRepository>>,
    thread_repo: Option<Arc<dyn ThreadRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    pin_repo: Option<Arc<dyn PinRepository>>,
    bookmark_repo: Option<Arc<dyn BookmarkRepository>>,
    poll_repo: Option<Arc<dyn PollRepository>>,
    webhook_repo: Option<Arc<dyn WebhookRepository>>,
    permission_repo: Option<Arc<dyn PermissionRepository>>,
    settings_repo: Option<Arc<dyn SettingsRepository>>,
    announcement_repo: Option<Arc<dyn AnnouncementRepository>>,
    tab_repo: Option<Arc<dyn TabRepository>>,
    section_repo: Option<Arc<dyn SectionRepository>>,
    template_repo: Option<Arc<dyn TemplateRepository>>,
    scheduled_repo: Option<Arc<dyn ScheduledMessageRepository>>,
    voice_repo: Option<Arc<dyn VoiceRepository>>,
    follower_repo: Option<Arc<dyn FollowerRepository>>,
    starred_repo: Option<Arc<dyn StarredRepository>>,
    read_receipt_repo: Option<Arc<dyn ReadReceiptRepository>>,
    activity_repo: Option<Arc<dyn ActivityLogRepository>>,
    link_repo: Option<Arc<dyn LinkRepository>>,
    cache: Option<Arc<dyn ChannelCache>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire every repository to PostgreSQL
    pub fn postgres(self, pool: &PgPool) -> Self {
        self.channel_repo(Arc::new(PgChannelRepository::new(pool.clone())))
            .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
            .invite_repo(Arc::new(PgInviteRepository::new(pool.clone())))
            .moderation_repo(Arc::new(PgModerationRepository::new(pool.clone())))
            .thread_repo(Arc::new(PgThreadRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
            .pin_repo(Arc::new(PgPinRepository::new(pool.clone())))
            .bookmark_repo(Arc::new(PgBookmarkRepository::new(pool.clone())))
            .poll_repo(Arc::new(PgPollRepository::new(pool.clone())))
            .webhook_repo(Arc::new(PgWebhookRepository::new(pool.clone())))
            .permission_repo(Arc::new(PgPermissionRepository::new(pool.clone())))
            .settings_repo(Arc::new(PgSettingsRepository::new(pool.clone())))
            .announcement_repo(Arc::new(PgAnnouncementRepository::new(pool.clone())))
            .tab_repo(Arc::new(PgTabRepository::new(pool.clone())))
            .section_repo(Arc::new(PgSectionRepository::new(pool.clone())))
            .template_repo(Arc::new(PgTemplateRepository::new(pool.clone())))
            .scheduled_repo(Arc::new(PgScheduledMessageRepository::new(pool.clone())))
            .voice_repo(Arc::new(PgVoiceRepository::new(pool.clone())))
            .follower_repo(Arc::new(PgFollowerRepository::new(pool.clone())))
            .starred_repo(Arc::new(PgStarredRepository::new(pool.clone())))
            .read_receipt_repo(Arc::new(PgReadReceiptRepository::new(pool.clone())))
            .activity_repo(Arc::new(PgActivityLogRepository::new(pool.clone())))
            .link_repo(Arc::new(PgLinkRepository::new(pool.clone())))
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn invite_repo(mut self, repo: Arc<dyn InviteRepository>) -> Self {
        self.invite_repo = Some(repo);
        self
    }

    pub fn moderation_repo(mut self, repo: Arc<dyn ModerationRepository>) -> Self {
        self.moderation_repo = Some(repo);
        self
    }

    pub fn thread_repo(mut self, repo: Arc<dyn ThreadRepository>) -> Self {
        self.thread_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn pin_repo(mut self, repo: Arc<dyn PinRepository>) -> Self {
        self.pin_repo = Some(repo);
        self
    }

    pub fn bookmark_repo(mut self, repo: Arc<dyn BookmarkRepository>) -> Self {
        self.bookmark_repo = Some(repo);
        self
    }

    pub fn poll_repo(mut self, repo: Arc<dyn PollRepository>) -> Self {
        self.poll_repo = Some(repo);
        self
    }

    pub fn webhook_repo(mut self, repo: Arc<dyn WebhookRepository>) -> Self {
        self.webhook_repo = Some(repo);
        self
    }

    pub fn permission_repo(mut self, repo: Arc<dyn PermissionRepository>) -> Self {
        self.permission_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn SettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn announcement_repo(mut self, repo: Arc<dyn AnnouncementRepository>) -> Self {
        self.announcement_repo = Some(repo);
        self
    }

    pub fn tab_repo(mut self, repo: Arc<dyn TabRepository>) -> Self {
        self.tab_repo = Some(repo);
        self
    }

    pub fn section_repo(mut self, repo: Arc<dyn SectionRepository>) -> Self {
        self.section_repo = Some(repo);
        self
    }

    pub fn template_repo(mut self, repo: Arc<dyn TemplateRepository>) -> Self {
        self.template_repo = Some(repo);
        self
    }

    pub fn scheduled_repo(mut self, repo: Arc<dyn ScheduledMessageRepository>) -> Self {
        self.scheduled_repo = Some(repo);
        self
    }

    pub fn voice_repo(mut self, repo: Arc<dyn VoiceRepository>) -> Self {
        self.voice_repo = Some(repo);
        self
    }

    pub fn follower_repo(mut self, repo: Arc<dyn FollowerRepository>) -> Self {
        self.follower_repo = Some(repo);
        self
    }

    pub fn starred_repo(mut self, repo: Arc<dyn StarredRepository>) -> Self {
        self.starred_repo = Some(repo);
        self
    }

    pub fn read_receipt_repo(mut self, repo: Arc<dyn ReadReceiptRepository>) -> Self {
        self.read_receipt_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityLogRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn link_repo(mut self, repo: Arc<dyn LinkRepository>) -> Self {
        self.link_repo = Some(repo);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn ChannelCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T: ?Sized>(value: Option<Arc<T>>, name: &str) -> ServiceResult<Arc<T>> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            channel_repo: required(self.channel_repo, "channel_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            invite_repo: required(self.invite_repo, "invite_repo")?,
            moderation_repo: required(self.moderation_repo, "moderation_repo")?,
            thread_repo: required(self.thread_repo, "thread_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            pin_repo: required(self.pin_repo, "pin_repo")?,
            bookmark_repo: required(self.bookmark_repo, "bookmark_repo")?,
            poll_repo: required(self.poll_repo, "poll_repo")?,
            webhook_repo: required(self.webhook_repo, "webhook_repo")?,
            permission_repo: required(self.permission_repo, "permission_repo")?,
            settings_repo: required(self.settings_repo, "settings_repo")?,
            announcement_repo: required(self.announcement_repo, "announcement_repo")?,
            tab_repo: required(self.tab_repo, "tab_repo")?,
            section_repo: required(self.section_repo, "section_repo")?,
            template_repo: required(self.template_repo, "template_repo")?,
            scheduled_repo: required(self.scheduled_repo, "scheduled_repo")?,
            voice_repo: required(self.voice_repo, "voice_repo")?,
            follower_repo: required(self.follower_repo, "follower_repo")?,
            starred_repo: required(self.starred_repo, "starred_repo")?,
            read_receipt_repo: required(self.read_receipt_repo, "read_receipt_repo")?,
            activity_repo: required(self.activity_repo, "activity_repo")?,
            link_repo: required(self.link_repo, "link_repo")?,
            cache: self.cache,
            publisher: self.publisher,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_repositories() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("channel_repo is required"));
    }
}
