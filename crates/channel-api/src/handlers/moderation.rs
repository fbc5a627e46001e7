//! Moderation handlers
//!
//! Bans, mutes, and the moderation log.

use axum::{extract::State, Json};
use channel_core::{Ban, ModerationEntry, Mute, Snowflake};
use channel_service::dto::{MuteStatusResponse, PaginatedResponse, RestrictMemberRequest};
use channel_service::services::ModerationService;

use crate::extractors::{AuthUser, Pagination, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List active bans
///
/// GET /channels/{channel_id}/bans
pub async fn list_bans(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Ban>>> {
    let service = ModerationService::new(state.service_context());
    let bans = service.list_bans(channel_id, auth.user_id).await?;
    Ok(Json(bans))
}

/// Ban a member; the membership is removed
///
/// PUT /channels/{channel_id}/bans/{user_id}
pub async fn ban_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<RestrictMemberRequest>,
) -> ApiResult<Json<Ban>> {
    let service = ModerationService::new(state.service_context());
    let ban = service.ban_member(channel_id, auth.user_id, user_id, request).await?;
    Ok(Json(ban))
}

/// Lift a ban
///
/// DELETE /channels/{channel_id}/bans/{user_id}
pub async fn unban_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = ModerationService::new(state.service_context());
    service.unban_member(channel_id, auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Mute a member
///
/// PUT /channels/{channel_id}/mutes/{user_id}
pub async fn mute_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<RestrictMemberRequest>,
) -> ApiResult<Json<Mute>> {
    let service = ModerationService::new(state.service_context());
    let mute = service.mute_member(channel_id, auth.user_id, user_id, request).await?;
    Ok(Json(mute))
}

/// List mutes, including expired ones
///
/// GET /channels/{channel_id}/mutes
pub async fn list_mutes(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Mute>>> {
    let service = ModerationService::new(state.service_context());
    let mutes = service.list_mutes(channel_id, auth.user_id).await?;
    Ok(Json(mutes))
}

/// Whether a user is muted right now
///
/// GET /channels/{channel_id}/mutes/{user_id}
pub async fn get_mute_status(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<MuteStatusResponse>> {
    let service = ModerationService::new(state.service_context());
    let status = service.mute_status(channel_id, auth.user_id, user_id).await?;
    Ok(Json(status))
}

/// Lift a mute
///
/// DELETE /channels/{channel_id}/mutes/{user_id}
pub async fn unmute_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = ModerationService::new(state.service_context());
    service.unmute_member(channel_id, auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Moderation log, newest first
///
/// GET /channels/{channel_id}/moderation-log?limit=50&offset=0
pub async fn get_moderation_history(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ModerationEntry>>> {
    let service = ModerationService::new(state.service_context());
    let entries = service
        .get_moderation_history(channel_id, auth.user_id, pagination.page())
        .await?;
    Ok(Json(PaginatedResponse::new(entries, pagination.limit, pagination.offset)))
}
