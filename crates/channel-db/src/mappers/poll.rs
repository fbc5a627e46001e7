//! Poll mappers

use channel_core::{Poll, PollOption, PollResult, Snowflake};

use crate::models::{PollModel, PollOptionModel, PollResultModel};

impl From<PollModel> for Poll {
    fn from(model: PollModel) -> Self {
        Poll {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            created_by: Snowflake::new(model.created_by),
            question: model.question,
            is_anonymous: model.is_anonymous,
            multi_choice: model.multi_choice,
            is_closed: model.is_closed,
            expires_at: model.expires_at,
            closed_at: model.closed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PollOptionModel> for PollOption {
    fn from(model: PollOptionModel) -> Self {
        PollOption::new(
            Snowflake::new(model.id),
            Snowflake::new(model.poll_id),
            model.text,
            model.position,
        )
    }
}

impl From<PollResultModel> for PollResult {
    fn from(model: PollResultModel) -> Self {
        PollResult {
            option_id: Snowflake::new(model.option_id),
            option_text: model.option_text,
            vote_count: model.vote_count,
        }
    }
}
