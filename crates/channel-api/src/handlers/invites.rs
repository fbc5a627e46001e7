//! Invite handlers
//!
//! Endpoints for invite management and code redemption.

use axum::{extract::State, Json};
use channel_core::{Channel, Invite, Snowflake};
use channel_service::dto::{CreateInviteRequest, InviteResponse};
use channel_service::services::InviteService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create invite
///
/// POST /channels/{channel_id}/invites
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateInviteRequest>,
) -> ApiResult<Created<Json<InviteResponse>>> {
    let service = InviteService::new(state.service_context());
    let invite = service.create_invite(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(invite)))
}

/// List channel invites
///
/// GET /channels/{channel_id}/invites
pub async fn list_invites(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Invite>>> {
    let service = InviteService::new(state.service_context());
    let invites = service.list_invites(channel_id, auth.user_id).await?;
    Ok(Json(invites))
}

/// Deactivate invite
///
/// DELETE /channels/{channel_id}/invites/{invite_id}
pub async fn delete_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, invite_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = InviteService::new(state.service_context());
    service.delete_invite(channel_id, auth.user_id, invite_id).await?;
    Ok(NoContent)
}

/// Join a channel with an invite code
///
/// POST /invites/{code}/join
pub async fn join_by_code(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(code): SnowflakePath<String>,
) -> ApiResult<Json<Channel>> {
    let service = InviteService::new(state.service_context());
    let channel = service.join_by_code(auth.user_id, &code).await?;
    Ok(Json(channel))
}
