//! Scheduled message handlers
//!
//! Delivery is done by an external worker; these endpoints only manage the queue.

use axum::{extract::State, Json};
use channel_core::{ScheduledMessage, Snowflake};
use channel_service::dto::{CreateScheduledMessageRequest, UpdateScheduledMessageRequest};
use channel_service::services::ScheduledMessageService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Schedule a message
///
/// POST /channels/{channel_id}/scheduled-messages
pub async fn create_scheduled(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateScheduledMessageRequest>,
) -> ApiResult<Created<Json<ScheduledMessage>>> {
    let service = ScheduledMessageService::new(state.service_context());
    let message = service.create(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(message)))
}

/// The caller's scheduled messages in a channel
///
/// GET /channels/{channel_id}/scheduled-messages
pub async fn list_scheduled(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<ScheduledMessage>>> {
    let service = ScheduledMessageService::new(state.service_context());
    let messages = service.list(channel_id, auth.user_id).await?;
    Ok(Json(messages))
}

/// The caller's scheduled messages everywhere
///
/// GET /users/@me/scheduled-messages
pub async fn list_my_scheduled(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ScheduledMessage>>> {
    let service = ScheduledMessageService::new(state.service_context());
    let messages = service.list_mine(auth.user_id).await?;
    Ok(Json(messages))
}

/// Get scheduled message
///
/// GET /channels/{channel_id}/scheduled-messages/{message_id}
pub async fn get_scheduled(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<ScheduledMessage>> {
    let service = ScheduledMessageService::new(state.service_context());
    let message = service.get(channel_id, auth.user_id, message_id).await?;
    Ok(Json(message))
}

/// Edit a pending message
///
/// PATCH /channels/{channel_id}/scheduled-messages/{message_id}
pub async fn update_scheduled(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<UpdateScheduledMessageRequest>,
) -> ApiResult<Json<ScheduledMessage>> {
    let service = ScheduledMessageService::new(state.service_context());
    let message = service
        .update(channel_id, auth.user_id, message_id, request)
        .await?;
    Ok(Json(message))
}

/// Cancel a pending message
///
/// DELETE /channels/{channel_id}/scheduled-messages/{message_id}
pub async fn cancel_scheduled(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<ScheduledMessage>> {
    let service = ScheduledMessageService::new(state.service_context());
    let message = service.cancel(channel_id, auth.user_id, message_id).await?;
    Ok(Json(message))
}
