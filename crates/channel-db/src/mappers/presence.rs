//! Scheduled message, voice, follower, starred, and read receipt mappers

use channel_core::{
    ChannelFollower, ReadReceipt, ScheduledMessage, ScheduledStatus, Snowflake, StarredChannel,
    VoiceState,
};

use crate::models::{
    FollowerModel, ReadReceiptModel, ScheduledMessageModel, StarredModel, VoiceStateModel,
};

impl From<ScheduledMessageModel> for ScheduledMessage {
    fn from(model: ScheduledMessageModel) -> Self {
        ScheduledMessage {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            scheduled_at: model.scheduled_at,
            status: ScheduledStatus::from(model.status.as_str()),
            sent_at: model.sent_at,
            thread_id: model.thread_id.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<VoiceStateModel> for VoiceState {
    fn from(model: VoiceStateModel) -> Self {
        VoiceState {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            is_muted: model.is_muted,
            is_deafened: model.is_deafened,
            is_screen_share: model.is_screen_share,
            is_video_on: model.is_video_on,
            joined_at: model.joined_at,
            disconnected_at: model.disconnected_at,
        }
    }
}

impl From<FollowerModel> for ChannelFollower {
    fn from(model: FollowerModel) -> Self {
        ChannelFollower {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            followed_at: model.followed_at,
        }
    }
}

impl From<StarredModel> for StarredChannel {
    fn from(model: StarredModel) -> Self {
        StarredChannel {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            position: model.position,
            created_at: model.created_at,
        }
    }
}

impl From<ReadReceiptModel> for ReadReceipt {
    fn from(model: ReadReceiptModel) -> Self {
        ReadReceipt {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            message_id: Snowflake::new(model.message_id),
            read_at: model.read_at,
        }
    }
}
