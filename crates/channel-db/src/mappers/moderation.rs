//! Ban/mute and moderation log mappers

use channel_core::{ModerationAction, ModerationEntry, Restriction, Snowflake};

use crate::models::{ModerationLogModel, RestrictionModel};

impl From<RestrictionModel> for Restriction {
    fn from(model: RestrictionModel) -> Self {
        Restriction {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            actor_id: Snowflake::new(model.actor_id),
            reason: model.reason,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}

impl From<ModerationLogModel> for ModerationEntry {
    fn from(model: ModerationLogModel) -> Self {
        ModerationEntry {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            action: ModerationAction::from(model.action.as_str()),
            actor_id: Snowflake::new(model.actor_id),
            reason: model.reason,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
