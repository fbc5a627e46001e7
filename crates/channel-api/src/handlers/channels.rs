//! Channel handlers
//!
//! Endpoints for channel lifecycle, discovery, and reporting.

use axum::{
    extract::{Query, State},
    Json,
};
use channel_core::{Channel, ChannelStats, DailyActivity, Snowflake, TopicHistory};
use channel_service::dto::{
    ChannelResponse, CloneChannelRequest, CreateChannelRequest, PaginatedResponse,
    TransferOwnershipRequest, UpdateChannelRequest,
};
use channel_service::services::ChannelService;
use serde::Deserialize;

use crate::extractors::{AuthUser, JsonBody, PaginationParams, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

/// Topic history page size when the caller gives none
const TOPIC_HISTORY_LIMIT: i64 = 20;

/// Create channel
///
/// POST /channels
pub async fn create_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<Channel>>> {
    let service = ChannelService::new(state.service_context());
    let channel = service.create_channel(auth.user_id, request).await?;
    Ok(Created(Json(channel)))
}

/// Get channel with member count and the caller's role
///
/// GET /channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ChannelResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.get_channel(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update channel
///
/// PATCH /channels/{channel_id}
pub async fn update_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<Channel>> {
    let service = ChannelService::new(state.service_context());
    let channel = service.update_channel(channel_id, auth.user_id, request).await?;
    Ok(Json(channel))
}

/// Delete channel
///
/// DELETE /channels/{channel_id}
pub async fn delete_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = ChannelService::new(state.service_context());
    service.delete_channel(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Archive channel
///
/// POST /channels/{channel_id}/archive
pub async fn archive_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = ChannelService::new(state.service_context());
    service.archive_channel(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Unarchive channel
///
/// POST /channels/{channel_id}/unarchive
pub async fn unarchive_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = ChannelService::new(state.service_context());
    service.unarchive_channel(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// List workspace channels
///
/// GET /workspaces/{workspace_id}/channels
pub async fn list_channels(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(workspace_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Channel>>> {
    let service = ChannelService::new(state.service_context());
    let channels = service.list_channels(workspace_id).await?;
    Ok(Json(channels))
}

/// List the caller's channels in a workspace
///
/// GET /workspaces/{workspace_id}/channels/mine
pub async fn list_user_channels(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(workspace_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Channel>>> {
    let service = ChannelService::new(state.service_context());
    let channels = service.list_user_channels(workspace_id, auth.user_id).await?;
    Ok(Json(channels))
}

/// Search channels by name or description
///
/// GET /workspaces/{workspace_id}/channels/search?q=
pub async fn search_channels(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(workspace_id): SnowflakePath<Snowflake>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Channel>>> {
    let service = ChannelService::new(state.service_context());
    let channels = service.search_channels(workspace_id, &query.q).await?;
    Ok(Json(channels))
}

/// Transfer ownership to another member
///
/// POST /channels/{channel_id}/transfer-ownership
pub async fn transfer_ownership(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<TransferOwnershipRequest>,
) -> ApiResult<NoContent> {
    let service = ChannelService::new(state.service_context());
    service
        .transfer_ownership(channel_id, auth.user_id, request.new_owner_id)
        .await?;
    Ok(NoContent)
}

/// Clone channel
///
/// POST /channels/{channel_id}/clone
pub async fn clone_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CloneChannelRequest>,
) -> ApiResult<Created<Json<Channel>>> {
    let service = ChannelService::new(state.service_context());
    let channel = service.clone_channel(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(channel)))
}

/// Channel statistics
///
/// GET /channels/{channel_id}/stats
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ChannelStats>> {
    let service = ChannelService::new(state.service_context());
    let stats = service.get_stats(channel_id, auth.user_id).await?;
    Ok(Json(stats))
}

/// Daily active members
///
/// GET /channels/{channel_id}/analytics?days=30
pub async fn get_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<Vec<DailyActivity>>> {
    let days = query.days.unwrap_or(30).clamp(1, 365);
    let service = ChannelService::new(state.service_context());
    let activity = service.get_analytics(channel_id, auth.user_id, days).await?;
    Ok(Json(activity))
}

/// Topic changes, newest first
///
/// GET /channels/{channel_id}/topic-history?limit=20&offset=0
pub async fn get_topic_history(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    params: PaginationParams,
) -> ApiResult<Json<PaginatedResponse<TopicHistory>>> {
    let pagination = params.resolve(TOPIC_HISTORY_LIMIT);
    let service = ChannelService::new(state.service_context());
    let history = service
        .get_topic_history(channel_id, auth.user_id, pagination.page())
        .await?;
    Ok(Json(PaginatedResponse::new(history, pagination.limit, pagination.offset)))
}
