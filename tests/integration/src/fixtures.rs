//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use channel_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Serialize)]
pub struct CreateChannelRequest {
    pub workspace_id: Snowflake,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: &'static str,
    pub description: Option<String>,
}

impl CreateChannelRequest {
    pub fn public(workspace_id: Snowflake) -> Self {
        Self {
            workspace_id,
            name: format!("general-{}", unique_suffix()),
            channel_type: "public",
            description: Some("A test channel".to_string()),
        }
    }

    pub fn private(workspace_id: Snowflake) -> Self {
        Self {
            channel_type: "private",
            ..Self::public(workspace_id)
        }
    }
}

/// Add member request
#[derive(Debug, Serialize)]
pub struct AddMemberRequest {
    pub user_id: Snowflake,
    pub role: Option<&'static str>,
}

impl AddMemberRequest {
    pub fn member(user_id: Snowflake) -> Self {
        Self { user_id, role: None }
    }

    pub fn admin(user_id: Snowflake) -> Self {
        Self {
            user_id,
            role: Some("admin"),
        }
    }
}

/// Create invite request
#[derive(Debug, Default, Serialize)]
pub struct CreateInviteRequest {
    pub max_uses: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateInviteRequest {
    pub fn single_use() -> Self {
        Self {
            max_uses: 1,
            expires_at: None,
        }
    }
}

/// Ban or mute request
#[derive(Debug, Default, Serialize)]
pub struct RestrictMemberRequest {
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Create poll request
#[derive(Debug, Serialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    pub multi_choice: bool,
}

impl CreatePollRequest {
    pub fn lunch() -> Self {
        Self {
            question: "Where to for lunch?".to_string(),
            options: vec!["Noodles".to_string(), "Tacos".to_string(), "Salad".to_string()],
            multi_choice: false,
        }
    }
}

/// Cast votes request
#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub option_ids: Vec<Snowflake>,
}

/// Transfer ownership request
#[derive(Debug, Serialize)]
pub struct TransferOwnershipRequest {
    pub new_owner_id: Snowflake,
}

// ============================================================================
// Responses
// ============================================================================

/// Channel response
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub id: Snowflake,
    pub workspace_id: Snowflake,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub is_archived: bool,
}

/// Channel with caller-relative details
#[derive(Debug, Deserialize)]
pub struct ChannelDetailsResponse {
    pub channel: ChannelResponse,
    pub member_count: i64,
    pub my_role: Option<String>,
}

/// Member response
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub role: String,
}

/// Invite response
#[derive(Debug, Deserialize)]
pub struct InviteResponse {
    pub id: Snowflake,
    pub code: String,
    pub max_uses: i32,
    pub use_count: i32,
    pub is_active: bool,
}

/// Invite with its channel name
#[derive(Debug, Deserialize)]
pub struct InviteDetailsResponse {
    pub invite: InviteResponse,
    pub channel_name: String,
}

/// Poll option response
#[derive(Debug, Deserialize)]
pub struct PollOptionResponse {
    pub id: Snowflake,
    pub text: String,
}

/// Poll response
#[derive(Debug, Deserialize)]
pub struct PollResponse {
    pub id: Snowflake,
    pub question: String,
    pub options: Vec<PollOptionResponse>,
}

/// Single option tally
#[derive(Debug, Deserialize)]
pub struct PollResultResponse {
    pub option_id: Snowflake,
    pub vote_count: i64,
}

/// Poll results response
#[derive(Debug, Deserialize)]
pub struct PollResultsResponse {
    pub is_closed: bool,
    pub total_votes: i64,
    pub results: Vec<PollResultResponse>,
}
