//! Domain entities - core business objects

pub mod activity_log;
mod announcement;
mod bookmark;
mod channel;
mod invite;
mod layout;
mod member;
mod moderation;
mod permission;
mod pin;
mod poll;
mod reaction;
mod scheduled_message;
mod section;
mod settings;
mod social;
mod template;
mod thread;
mod voice;
mod webhook;

pub use activity_log::ActivityLogEntry;
pub use announcement::{Announcement, AnnouncementPriority};
pub use bookmark::{Bookmark, MAX_BOOKMARKS_PER_USER};
pub use channel::{Channel, ChannelStats, ChannelType, DailyActivity, TopicHistory};
pub use invite::{generate_invite_code, Invite, INVITE_CODE_LEN};
pub use layout::{ChannelLink, ChannelTab, LinkType};
pub use member::{ChannelMember, MemberRole, NotificationLevel};
pub use moderation::{Ban, ModerationAction, ModerationEntry, Mute, Restriction};
pub use permission::{PermissionOverride, PermissionTarget};
pub use pin::Pin;
pub use poll::{Poll, PollOption, PollResult, PollVote, MAX_POLL_OPTIONS, MIN_POLL_OPTIONS};
pub use reaction::{Reaction, ReactionSummary};
pub use scheduled_message::{ScheduledMessage, ScheduledStatus};
pub use section::Section;
pub use settings::ChannelSettings;
pub use social::{ChannelFollower, ReadReceipt, StarredChannel};
pub use template::ChannelTemplate;
pub use thread::{Thread, ThreadFollower, ThreadReply};
pub use voice::{VoiceState, VoiceStatePatch};
pub use webhook::{Webhook, WebhookEvent};
