//! Member handlers
//!
//! Endpoints for channel membership, roles, and bulk roster changes.

use axum::{extract::State, Json};
use channel_core::{ChannelMember, Snowflake};
use channel_service::dto::{
    AddMemberRequest, BulkActionResult, BulkMembersRequest, BulkRoleRequest, CountResponse,
    UpdateMemberRoleRequest, UpdateNotificationsRequest,
};
use channel_service::services::MemberService;

use crate::extractors::{AuthUser, JsonBody, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List channel members
///
/// GET /channels/{channel_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<ChannelMember>>> {
    let service = MemberService::new(state.service_context());
    let members = service.list_members(channel_id).await?;
    Ok(Json(members))
}

/// Add member
///
/// POST /channels/{channel_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<AddMemberRequest>,
) -> ApiResult<Created<Json<ChannelMember>>> {
    let service = MemberService::new(state.service_context());
    let member = service.add_member(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(member)))
}

/// Get a single member
///
/// GET /channels/{channel_id}/members/{user_id}
pub async fn get_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<ChannelMember>> {
    let service = MemberService::new(state.service_context());
    let member = service.get_member(channel_id, user_id).await?;
    Ok(Json(member))
}

/// Remove member
///
/// DELETE /channels/{channel_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.remove_member(channel_id, auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Change a member's role
///
/// PATCH /channels/{channel_id}/members/{user_id}/role
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, user_id)): SnowflakePath<(Snowflake, Snowflake)>,
    JsonBody(request): JsonBody<UpdateMemberRoleRequest>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service
        .update_member_role(channel_id, auth.user_id, user_id, request.role)
        .await?;
    Ok(NoContent)
}

/// Leave channel
///
/// POST /channels/{channel_id}/leave
pub async fn leave_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.leave_channel(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Set the caller's notification level
///
/// PATCH /channels/{channel_id}/notifications
pub async fn update_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<UpdateNotificationsRequest>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service
        .update_notifications(channel_id, auth.user_id, request.level)
        .await?;
    Ok(NoContent)
}

/// Stamp the caller's last-read time
///
/// POST /channels/{channel_id}/read-state
pub async fn update_last_read(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.update_last_read(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Add many members at once; existing and banned users are skipped
///
/// POST /channels/{channel_id}/bulk-members
pub async fn bulk_add_members(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<BulkMembersRequest>,
) -> ApiResult<Json<CountResponse>> {
    let service = MemberService::new(state.service_context());
    let added = service.bulk_add_members(channel_id, auth.user_id, request).await?;
    Ok(Json(CountResponse {
        count: i64::try_from(added).unwrap_or(i64::MAX),
    }))
}

/// Remove many members at once
///
/// DELETE /channels/{channel_id}/bulk-members
pub async fn bulk_delete_members(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<BulkMembersRequest>,
) -> ApiResult<Json<BulkActionResult>> {
    let service = MemberService::new(state.service_context());
    let result = service
        .bulk_delete_members(channel_id, auth.user_id, request.user_ids)
        .await?;
    Ok(Json(result))
}

/// Change many members' roles at once
///
/// PATCH /channels/{channel_id}/bulk-roles
pub async fn bulk_update_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<BulkRoleRequest>,
) -> ApiResult<Json<BulkActionResult>> {
    let service = MemberService::new(state.service_context());
    let result = service.bulk_update_roles(channel_id, auth.user_id, request).await?;
    Ok(Json(result))
}
