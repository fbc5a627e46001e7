//! Channel member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channel_members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub role: String,
    pub notifications: String,
    pub joined_at: DateTime<Utc>,
    pub last_read_at: Option<DateTime<Utc>>,
}
