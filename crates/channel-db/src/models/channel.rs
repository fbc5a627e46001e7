//! Channel database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    /// 'public', 'private', 'dm', 'group_dm'
    #[sqlx(rename = "type")]
    pub channel_type: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub icon_url: Option<String>,
    pub is_archived: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for channel_topic_history table
#[derive(Debug, Clone, FromRow)]
pub struct TopicHistoryModel {
    pub id: i64,
    pub channel_id: i64,
    pub old_topic: Option<String>,
    pub new_topic: Option<String>,
    pub changed_by: i64,
    pub changed_at: DateTime<Utc>,
}

/// Aggregate row for channel statistics
#[derive(Debug, Clone, FromRow)]
pub struct ChannelStatsModel {
    pub member_count: i64,
    pub pin_count: i64,
    pub active_members_week: i64,
}

/// One day of reader activity
#[derive(Debug, Clone, FromRow)]
pub struct DailyActivityModel {
    pub date: NaiveDate,
    pub active_users: i64,
}
