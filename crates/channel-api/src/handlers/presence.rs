//! Voice participation and typing indicator handlers

use axum::{extract::State, Json};
use channel_core::{Snowflake, VoiceState, VoiceStatePatch};
use channel_service::dto::{CountResponse, TypingResponse};
use channel_service::services::{TypingService, VoiceService};

use crate::extractors::{AuthUser, JsonBody, SnowflakePath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Join voice
///
/// POST /channels/{channel_id}/voice/join
pub async fn join_voice(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<VoiceState>> {
    let service = VoiceService::new(state.service_context());
    let voice = service.join(channel_id, auth.user_id).await?;
    Ok(Json(voice))
}

/// Leave voice
///
/// POST /channels/{channel_id}/voice/leave
pub async fn leave_voice(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = VoiceService::new(state.service_context());
    service.leave(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Toggle mute, deafen, video, or screen share
///
/// PATCH /channels/{channel_id}/voice/state
pub async fn update_voice_state(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(patch): JsonBody<VoiceStatePatch>,
) -> ApiResult<Json<VoiceState>> {
    let service = VoiceService::new(state.service_context());
    let voice = service.update_state(channel_id, auth.user_id, patch).await?;
    Ok(Json(voice))
}

/// Connected participants
///
/// GET /channels/{channel_id}/voice/participants
pub async fn list_participants(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<VoiceState>>> {
    let service = VoiceService::new(state.service_context());
    let participants = service.list_participants(channel_id, auth.user_id).await?;
    Ok(Json(participants))
}

/// GET /channels/{channel_id}/voice/count
pub async fn count_participants(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<CountResponse>> {
    let service = VoiceService::new(state.service_context());
    let count = service.count_participants(channel_id, auth.user_id).await?;
    Ok(Json(CountResponse { count }))
}

/// Mark the caller as typing
///
/// POST /channels/{channel_id}/typing
pub async fn set_typing(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = TypingService::new(state.service_context());
    service.set_typing(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Users typing right now
///
/// GET /channels/{channel_id}/typing
pub async fn get_typing(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<TypingResponse>> {
    let service = TypingService::new(state.service_context());
    let typing = service.get_typing(channel_id, auth.user_id).await?;
    Ok(Json(typing))
}
