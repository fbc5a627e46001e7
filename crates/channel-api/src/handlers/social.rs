//! Follower, starred channel, and read receipt handlers

use axum::{extract::State, Json};
use channel_core::{ChannelFollower, ReadReceipt, Snowflake, StarredChannel};
use channel_service::dto::{
    CountResponse, FollowStatus, MarkReadRequest, PaginatedResponse, ReadReceiptSummary,
};
use channel_service::services::{FollowerService, ReadReceiptService, StarredService};

use crate::extractors::{AuthUser, JsonBody, Pagination, SnowflakePath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

// ============================================================================
// Followers
// ============================================================================

/// Follow a channel
///
/// PUT /channels/{channel_id}/follow
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ChannelFollower>> {
    let service = FollowerService::new(state.service_context());
    let follower = service.follow(channel_id, auth.user_id).await?;
    Ok(Json(follower))
}

/// Unfollow a channel
///
/// DELETE /channels/{channel_id}/follow
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = FollowerService::new(state.service_context());
    service.unfollow(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Whether the caller follows the channel
///
/// GET /channels/{channel_id}/follow
pub async fn is_following(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<FollowStatus>> {
    let service = FollowerService::new(state.service_context());
    let status = service.is_following(channel_id, auth.user_id).await?;
    Ok(Json(status))
}

/// List followers
///
/// GET /channels/{channel_id}/followers?limit=&offset=
pub async fn list_followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ChannelFollower>>> {
    let service = FollowerService::new(state.service_context());
    let followers = service.list_followers(channel_id, pagination.page()).await?;
    Ok(Json(PaginatedResponse::new(followers, pagination.limit, pagination.offset)))
}

/// GET /channels/{channel_id}/followers/count
pub async fn count_followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<CountResponse>> {
    let service = FollowerService::new(state.service_context());
    let count = service.count(channel_id).await?;
    Ok(Json(CountResponse { count }))
}

/// Channel ids the caller follows
///
/// GET /users/@me/followed-channels
pub async fn list_followed_channels(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Snowflake>>> {
    let service = FollowerService::new(state.service_context());
    let channels = service.list_followed_channels(auth.user_id).await?;
    Ok(Json(channels))
}

// ============================================================================
// Starred
// ============================================================================

/// Star a channel
///
/// PUT /channels/{channel_id}/star
pub async fn star(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<StarredChannel>> {
    let service = StarredService::new(state.service_context());
    let starred = service.star(channel_id, auth.user_id).await?;
    Ok(Json(starred))
}

/// Unstar a channel
///
/// DELETE /channels/{channel_id}/star
pub async fn unstar(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = StarredService::new(state.service_context());
    service.unstar(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// The caller's starred channels by position
///
/// GET /users/@me/starred
pub async fn list_starred(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<StarredChannel>>> {
    let service = StarredService::new(state.service_context());
    let starred = service.list_starred(auth.user_id).await?;
    Ok(Json(starred))
}

// ============================================================================
// Read receipts
// ============================================================================

/// Record that the caller read a message
///
/// POST /channels/{channel_id}/receipts
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<MarkReadRequest>,
) -> ApiResult<Json<ReadReceipt>> {
    let service = ReadReceiptService::new(state.service_context());
    let receipt = service
        .mark_read(channel_id, auth.user_id, request.message_id)
        .await?;
    Ok(Json(receipt))
}

/// Who read a message
///
/// GET /channels/{channel_id}/messages/{message_id}/receipts
pub async fn list_receipts(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<ReadReceiptSummary>> {
    let service = ReadReceiptService::new(state.service_context());
    let summary = service.list_receipts(channel_id, auth.user_id, message_id).await?;
    Ok(Json(summary))
}

/// GET /channels/{channel_id}/messages/{message_id}/receipts/count
pub async fn read_count(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<CountResponse>> {
    let service = ReadReceiptService::new(state.service_context());
    let count = service.read_count(channel_id, auth.user_id, message_id).await?;
    Ok(Json(CountResponse { count }))
}
