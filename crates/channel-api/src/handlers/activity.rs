//! Activity log handlers

use axum::{extract::State, Json};
use channel_core::{ActivityLogEntry, Snowflake};
use channel_service::dto::PaginatedResponse;
use channel_service::services::ActivityService;

use crate::extractors::{AuthUser, Pagination, SnowflakePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Channel activity, newest first
///
/// GET /channels/{channel_id}/activity?limit=&offset=
pub async fn get_channel_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ActivityLogEntry>>> {
    let service = ActivityService::new(state.service_context());
    let entries = service
        .get_channel_activity(channel_id, auth.user_id, pagination.page())
        .await?;
    Ok(Json(PaginatedResponse::new(entries, pagination.limit, pagination.offset)))
}

/// The caller's own actions across channels
///
/// GET /users/@me/activity?limit=&offset=
pub async fn get_user_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ActivityLogEntry>>> {
    let service = ActivityService::new(state.service_context());
    let entries = service.get_user_activity(auth.user_id, pagination.page()).await?;
    Ok(Json(PaginatedResponse::new(entries, pagination.limit, pagination.offset)))
}
