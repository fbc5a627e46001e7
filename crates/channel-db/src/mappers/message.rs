//! Reaction, pin, and bookmark mappers

use channel_core::{Bookmark, Pin, Reaction, ReactionSummary, Snowflake};

use crate::models::{BookmarkModel, PinModel, ReactionCountModel, ReactionModel};

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            message_id: Snowflake::new(model.message_id),
            user_id: Snowflake::new(model.user_id),
            emoji: model.emoji,
            created_at: model.created_at,
        }
    }
}

impl From<ReactionCountModel> for ReactionSummary {
    fn from(model: ReactionCountModel) -> Self {
        ReactionSummary::new(model.emoji, model.count)
    }
}

impl From<PinModel> for Pin {
    fn from(model: PinModel) -> Self {
        Pin {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            message_id: Snowflake::new(model.message_id),
            pinned_by: Snowflake::new(model.pinned_by),
            pinned_at: model.pinned_at,
        }
    }
}

impl From<BookmarkModel> for Bookmark {
    fn from(model: BookmarkModel) -> Self {
        Bookmark {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            title: model.title,
            url: model.url,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
