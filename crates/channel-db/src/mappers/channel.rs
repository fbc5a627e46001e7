//! Channel, topic history, stats, and invite mappers

use channel_core::{Channel, ChannelStats, ChannelType, DailyActivity, Invite, Snowflake, TopicHistory};

use crate::models::{ChannelModel, ChannelStatsModel, DailyActivityModel, InviteModel, TopicHistoryModel};

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            workspace_id: Snowflake::new(model.workspace_id),
            name: model.name,
            channel_type: ChannelType::from(model.channel_type.as_str()),
            description: model.description,
            topic: model.topic,
            icon_url: model.icon_url,
            is_archived: model.is_archived,
            created_by: model.created_by.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

impl From<TopicHistoryModel> for TopicHistory {
    fn from(model: TopicHistoryModel) -> Self {
        TopicHistory {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            old_topic: model.old_topic,
            new_topic: model.new_topic,
            changed_by: Snowflake::new(model.changed_by),
            changed_at: model.changed_at,
        }
    }
}

impl From<ChannelStatsModel> for ChannelStats {
    fn from(model: ChannelStatsModel) -> Self {
        ChannelStats {
            member_count: model.member_count,
            pin_count: model.pin_count,
            active_members_week: model.active_members_week,
        }
    }
}

impl From<DailyActivityModel> for DailyActivity {
    fn from(model: DailyActivityModel) -> Self {
        DailyActivity {
            date: model.date,
            active_users: model.active_users,
        }
    }
}

impl From<InviteModel> for Invite {
    fn from(model: InviteModel) -> Self {
        Invite {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            created_by: Snowflake::new(model.created_by),
            code: model.code,
            max_uses: model.max_uses,
            use_count: model.use_count,
            expires_at: model.expires_at,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
