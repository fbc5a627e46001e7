//! Business logic services
//!
//! One service per feature area, each borrowing the shared `ServiceContext`.
//! Every channel-scoped operation passes through the `ChannelAccess` ladder
//! before touching the target entity.

pub mod access;
pub mod activity;
pub mod announcement;
pub mod bookmark;
pub mod channel;
pub mod context;
pub mod error;
mod events;
pub mod invite;
pub mod link;
pub mod member;
pub mod moderation;
pub mod permission;
pub mod pin;
pub mod poll;
pub mod reaction;
pub mod scheduled;
pub mod section;
pub mod settings;
pub mod social;
pub mod tab;
pub mod template;
pub mod thread;
pub mod typing;
pub mod voice;
pub mod webhook;

// Re-export all services for convenience
pub use access::ChannelAccess;
pub use activity::ActivityService;
pub use announcement::AnnouncementService;
pub use bookmark::BookmarkService;
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invite::InviteService;
pub use link::LinkService;
pub use member::MemberService;
pub use moderation::ModerationService;
pub use permission::PermissionService;
pub use pin::PinService;
pub use poll::PollService;
pub use reaction::ReactionService;
pub use scheduled::ScheduledMessageService;
pub use section::SectionService;
pub use settings::SettingsService;
pub use social::{FollowerService, ReadReceiptService, StarredService};
pub use tab::TabService;
pub use template::TemplateService;
pub use thread::ThreadService;
pub use typing::TypingService;
pub use voice::VoiceService;
pub use webhook::WebhookService;
