//! Announcement handlers

use axum::{extract::State, Json};
use channel_core::{Announcement, Snowflake};
use channel_service::dto::{CreateAnnouncementRequest, UpdateAnnouncementRequest};
use channel_service::services::AnnouncementService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create announcement
///
/// POST /channels/{channel_id}/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateAnnouncementRequest>,
) -> ApiResult<Created<Json<Announcement>>> {
    let service = AnnouncementService::new(state.service_context());
    let announcement = service
        .create_announcement(channel_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(announcement)))
}

/// List announcements, pinned first
///
/// GET /channels/{channel_id}/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Announcement>>> {
    let service = AnnouncementService::new(state.service_context());
    let announcements = service.list_announcements(channel_id, auth.user_id).await?;
    Ok(Json(announcements))
}

/// Update announcement
///
/// PATCH /channels/{channel_id}/announcements/{announcement_id}
pub async fn update_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, announcement_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<UpdateAnnouncementRequest>,
) -> ApiResult<Json<Announcement>> {
    let service = AnnouncementService::new(state.service_context());
    let announcement = service
        .update_announcement(channel_id, auth.user_id, announcement_id, request)
        .await?;
    Ok(Json(announcement))
}

/// Delete announcement
///
/// DELETE /channels/{channel_id}/announcements/{announcement_id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, announcement_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = AnnouncementService::new(state.service_context());
    service
        .delete_announcement(channel_id, auth.user_id, announcement_id)
        .await?;
    Ok(NoContent)
}

/// Flip the pinned flag
///
/// POST /channels/{channel_id}/announcements/{announcement_id}/pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, announcement_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<Announcement>> {
    let service = AnnouncementService::new(state.service_context());
    let announcement = service
        .toggle_pin(channel_id, auth.user_id, announcement_id)
        .await?;
    Ok(Json(announcement))
}
