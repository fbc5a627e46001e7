//! Thread, reply, and follower mappers

use channel_core::{Snowflake, Thread, ThreadFollower, ThreadReply};

use crate::models::{ThreadFollowerModel, ThreadModel, ThreadReplyModel};

impl From<ThreadModel> for Thread {
    fn from(model: ThreadModel) -> Self {
        Thread {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            message_id: Snowflake::new(model.message_id),
            title: model.title,
            created_by: Snowflake::new(model.created_by),
            is_locked: model.is_locked,
            is_resolved: model.is_resolved,
            reply_count: model.reply_count,
            last_reply_at: model.last_reply_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ThreadReplyModel> for ThreadReply {
    fn from(model: ThreadReplyModel) -> Self {
        ThreadReply {
            id: Snowflake::new(model.id),
            thread_id: Snowflake::new(model.thread_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            parent_id: model.parent_id.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ThreadFollowerModel> for ThreadFollower {
    fn from(model: ThreadFollowerModel) -> Self {
        ThreadFollower {
            id: Snowflake::new(model.id),
            thread_id: Snowflake::new(model.thread_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}
