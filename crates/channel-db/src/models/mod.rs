//! Database models - SQLx-compatible structs for PostgreSQL tables

mod channel;
mod governance;
mod invite;
mod layout;
mod member;
mod message;
mod moderation;
mod poll;
mod presence;
mod thread;

pub use channel::{ChannelModel, ChannelStatsModel, DailyActivityModel, TopicHistoryModel};
pub use governance::{
    ActivityLogModel, AnnouncementModel, PermissionModel, SettingsModel, WebhookModel,
};
pub use invite::InviteModel;
pub use layout::{LinkModel, SectionModel, TabModel, TemplateModel};
pub use member::MemberModel;
pub use message::{BookmarkModel, PinModel, ReactionCountModel, ReactionModel};
pub use moderation::{ModerationLogModel, RestrictionModel};
pub use poll::{PollModel, PollOptionModel, PollResultModel};
pub use presence::{
    FollowerModel, ReadReceiptModel, ScheduledMessageModel, StarredModel, VoiceStateModel,
};
pub use thread::{ThreadFollowerModel, ThreadModel, ThreadReplyModel};
