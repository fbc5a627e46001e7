//! Invite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channel_invites table
#[derive(Debug, Clone, FromRow)]
pub struct InviteModel {
    pub id: i64,
    pub channel_id: i64,
    pub created_by: i64,
    pub code: String,
    pub max_uses: i32,
    pub use_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
