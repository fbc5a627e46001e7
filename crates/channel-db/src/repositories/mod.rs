//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in channel-core.
//! Multi-row writes run inside a single transaction.

mod activity_log;
mod announcement;
mod bookmark;
mod channel;
mod error;
mod follower;
mod invite;
mod link;
mod member;
mod moderation;
mod permission;
mod pin;
mod poll;
mod reaction;
mod read_receipt;
mod scheduled_message;
mod section;
mod settings;
mod starred;
mod tab;
mod template;
mod thread;
mod voice;
mod webhook;

pub use activity_log::PgActivityLogRepository;
pub use announcement::PgAnnouncementRepository;
pub use bookmark::PgBookmarkRepository;
pub use channel::PgChannelRepository;
pub use follower::PgFollowerRepository;
pub use invite::PgInviteRepository;
pub use link::PgLinkRepository;
pub use member::PgMemberRepository;
pub use moderation::PgModerationRepository;
pub use permission::PgPermissionRepository;
pub use pin::PgPinRepository;
pub use poll::PgPollRepository;
pub use reaction::PgReactionRepository;
pub use read_receipt::PgReadReceiptRepository;
pub use scheduled_message::PgScheduledMessageRepository;
pub use section::PgSectionRepository;
pub use settings::PgSettingsRepository;
pub use starred::PgStarredRepository;
pub use tab::PgTabRepository;
pub use template::PgTemplateRepository;
pub use thread::PgThreadRepository;
pub use voice::PgVoiceRepository;
pub use webhook::PgWebhookRepository;
