//! Poll database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channel_polls table
#[derive(Debug, Clone, FromRow)]
pub struct PollModel {
    pub id: i64,
    pub channel_id: i64,
    pub created_by: i64,
    pub question: String,
    pub is_anonymous: bool,
    pub multi_choice: bool,
    pub is_closed: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for poll_options table
#[derive(Debug, Clone, FromRow)]
pub struct PollOptionModel {
    pub id: i64,
    pub poll_id: i64,
    pub text: String,
    pub position: i32,
}

/// Vote tally for one option
#[derive(Debug, Clone, FromRow)]
pub struct PollResultModel {
    pub option_id: i64,
    pub option_text: String,
    pub vote_count: i64,
}
