//! Pin and bookmark handlers

use axum::{extract::State, Json};
use channel_core::{Bookmark, Pin, Snowflake};
use channel_service::dto::{CreateBookmarkRequest, PinMessageRequest, UpdateBookmarkRequest};
use channel_service::services::{BookmarkService, PinService};

use crate::extractors::{AuthUser, JsonBody, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Pin a message
///
/// POST /channels/{channel_id}/pins
pub async fn pin_message(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<PinMessageRequest>,
) -> ApiResult<Created<Json<Pin>>> {
    let service = PinService::new(state.service_context());
    let pin = service
        .pin_message(channel_id, auth.user_id, request.message_id)
        .await?;
    Ok(Created(Json(pin)))
}

/// Unpin a message
///
/// DELETE /channels/{channel_id}/pins/{message_id}
pub async fn unpin_message(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = PinService::new(state.service_context());
    service.unpin_message(channel_id, auth.user_id, message_id).await?;
    Ok(NoContent)
}

/// List pins, newest first
///
/// GET /channels/{channel_id}/pins
pub async fn list_pins(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Pin>>> {
    let service = PinService::new(state.service_context());
    let pins = service.list_pins(channel_id, auth.user_id).await?;
    Ok(Json(pins))
}

/// Create bookmark
///
/// POST /channels/{channel_id}/bookmarks
pub async fn create_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateBookmarkRequest>,
) -> ApiResult<Created<Json<Bookmark>>> {
    let service = BookmarkService::new(state.service_context());
    let bookmark = service.create_bookmark(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(bookmark)))
}

/// List the caller's bookmarks in position order
///
/// GET /channels/{channel_id}/bookmarks
pub async fn list_bookmarks(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Bookmark>>> {
    let service = BookmarkService::new(state.service_context());
    let bookmarks = service.list_bookmarks(channel_id, auth.user_id).await?;
    Ok(Json(bookmarks))
}

/// Update bookmark
///
/// PATCH /channels/{channel_id}/bookmarks/{bookmark_id}
pub async fn update_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, bookmark_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<UpdateBookmarkRequest>,
) -> ApiResult<Json<Bookmark>> {
    let service = BookmarkService::new(state.service_context());
    let bookmark = service
        .update_bookmark(channel_id, auth.user_id, bookmark_id, request)
        .await?;
    Ok(Json(bookmark))
}

/// Delete bookmark
///
/// DELETE /channels/{channel_id}/bookmarks/{bookmark_id}
pub async fn delete_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, bookmark_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = BookmarkService::new(state.service_context());
    service.delete_bookmark(channel_id, auth.user_id, bookmark_id).await?;
    Ok(NoContent)
}
