//! Response DTOs for API endpoints
//!
//! Entities serialize directly; the types here are the composite views.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use channel_core::{Channel, Invite, MemberRole, Poll, PollOption, PollResult, Snowflake};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Limit/offset page of results
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, limit: i64, offset: i64) -> Self {
        let has_more = i64::try_from(data.len()).is_ok_and(|len| len >= limit);
        Self {
            data,
            pagination: PaginationMeta {
                limit,
                offset,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub limit: i64,
    pub offset: i64,
    /// A full page came back, so another may follow
    pub has_more: bool,
}

/// Bare count
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

// ============================================================================
// Channel Responses
// ============================================================================

/// Channel with caller-relative details
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub channel: Channel,
    pub member_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_role: Option<MemberRole>,
}

/// Outcome of a bulk membership operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkActionResult {
    pub successful: u32,
    pub failed: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl BulkActionResult {
    pub fn succeed(&mut self) {
        self.successful += 1;
    }

    pub fn fail(&mut self, user_id: Snowflake, reason: impl std::fmt::Display) {
        self.failed += 1;
        self.errors.push(format!("{user_id}: {reason}"));
    }
}

// ============================================================================
// Invite Responses
// ============================================================================

/// Whether a user is muted right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MuteStatusResponse {
    pub user_id: Snowflake,
    pub is_muted: bool,
}

/// Invite with the name of the channel it opens
#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub invite: Invite,
    pub channel_name: String,
}

// ============================================================================
// Poll Responses
// ============================================================================

/// Poll with its options
#[derive(Debug, Clone, Serialize)]
pub struct PollResponse {
    #[serde(flatten)]
    pub poll: Poll,
    pub options: Vec<PollOption>,
}

/// Vote tally
#[derive(Debug, Clone, Serialize)]
pub struct PollResultsResponse {
    pub poll_id: Snowflake,
    pub is_closed: bool,
    pub total_votes: i64,
    pub results: Vec<PollResult>,
}

// ============================================================================
// Social Responses
// ============================================================================

/// Who has read a message
#[derive(Debug, Clone, Serialize)]
pub struct ReadReceiptSummary {
    pub message_id: Snowflake,
    pub read_by: Vec<Snowflake>,
    pub read_count: i64,
}

/// Follow state for the caller
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FollowStatus {
    pub channel_id: Snowflake,
    pub following: bool,
}

/// Users currently typing
#[derive(Debug, Clone, Serialize)]
pub struct TypingResponse {
    pub channel_id: Snowflake,
    pub user_ids: Vec<Snowflake>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// "disabled" when no Redis is configured
    pub redis: String,
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when Redis is not configured
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        let label = |healthy: bool| if healthy { "healthy" } else { "unhealthy" };
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy).to_string(),
                redis: redis_healthy.map_or("disabled", label).to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
