//! Layout database models - tabs, links, sections, templates

use channel_core::Snowflake;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for channel_tabs table
#[derive(Debug, Clone, FromRow)]
pub struct TabModel {
    pub id: i64,
    pub channel_id: i64,
    pub name: String,
    pub tab_type: String,
    pub config: Option<serde_json::Value>,
    pub position: i32,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_links table
#[derive(Debug, Clone, FromRow)]
pub struct LinkModel {
    pub id: i64,
    pub source_channel_id: i64,
    pub target_channel_id: i64,
    pub created_by: i64,
    pub link_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_sections table
#[derive(Debug, Clone, FromRow)]
pub struct SectionModel {
    pub id: i64,
    pub workspace_id: i64,
    pub user_id: i64,
    pub name: String,
    pub position: i32,
    pub is_collapsed: bool,
    pub channel_ids: Json<Vec<Snowflake>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for channel_templates table
#[derive(Debug, Clone, FromRow)]
pub struct TemplateModel {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub channel_type: String,
    pub topic: Option<String>,
    pub settings: Option<serde_json::Value>,
    pub use_count: i32,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
