//! Member entity <- model mapper

use channel_core::{ChannelMember, MemberRole, NotificationLevel, Snowflake};

use crate::models::MemberModel;

impl From<MemberModel> for ChannelMember {
    fn from(model: MemberModel) -> Self {
        ChannelMember {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            role: MemberRole::from(model.role.as_str()),
            notifications: NotificationLevel::from(model.notifications.as_str()),
            joined_at: model.joined_at,
            last_read_at: model.last_read_at,
        }
    }
}
