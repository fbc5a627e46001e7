//! Thread handlers
//!
//! Threads, their replies, and thread followers.

use axum::{extract::State, Json};
use channel_core::{Snowflake, Thread, ThreadFollower, ThreadReply};
use channel_service::dto::{
    CreateReplyRequest, CreateThreadRequest, PaginatedResponse, UpdateReplyRequest,
    UpdateThreadRequest,
};
use channel_service::services::ThreadService;

use crate::extractors::{AuthUser, Pagination, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

type ThreadPath = SnowflakePath<(Snowflake, Snowflake)>;
type ReplyPath = SnowflakePath<(Snowflake, Snowflake, Snowflake)>;

/// Create thread
///
/// POST /channels/{channel_id}/threads
pub async fn create_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateThreadRequest>,
) -> ApiResult<Created<Json<Thread>>> {
    let service = ThreadService::new(state.service_context());
    let thread = service.create_thread(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(thread)))
}

/// List threads
///
/// GET /channels/{channel_id}/threads?limit=&offset=
pub async fn list_threads(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<Thread>>> {
    let service = ThreadService::new(state.service_context());
    let threads = service
        .list_threads(channel_id, auth.user_id, pagination.page())
        .await?;
    Ok(Json(PaginatedResponse::new(threads, pagination.limit, pagination.offset)))
}

/// Get thread
///
/// GET /channels/{channel_id}/threads/{thread_id}
pub async fn get_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
) -> ApiResult<Json<Thread>> {
    let service = ThreadService::new(state.service_context());
    let thread = service.get_thread(channel_id, auth.user_id, thread_id).await?;
    Ok(Json(thread))
}

/// Update thread (creator or moderator)
///
/// PATCH /channels/{channel_id}/threads/{thread_id}
pub async fn update_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
    ValidatedJson(request): ValidatedJson<UpdateThreadRequest>,
) -> ApiResult<Json<Thread>> {
    let service = ThreadService::new(state.service_context());
    let thread = service
        .update_thread(channel_id, auth.user_id, thread_id, request)
        .await?;
    Ok(Json(thread))
}

/// Delete thread (creator or moderator)
///
/// DELETE /channels/{channel_id}/threads/{thread_id}
pub async fn delete_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
) -> ApiResult<NoContent> {
    let service = ThreadService::new(state.service_context());
    service.delete_thread(channel_id, auth.user_id, thread_id).await?;
    Ok(NoContent)
}

/// Reply to a thread
///
/// POST /channels/{channel_id}/threads/{thread_id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
    ValidatedJson(request): ValidatedJson<CreateReplyRequest>,
) -> ApiResult<Created<Json<ThreadReply>>> {
    let service = ThreadService::new(state.service_context());
    let reply = service
        .create_reply(channel_id, auth.user_id, thread_id, request)
        .await?;
    Ok(Created(Json(reply)))
}

/// List replies, oldest first
///
/// GET /channels/{channel_id}/threads/{thread_id}/replies?limit=&offset=
pub async fn list_replies(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ThreadReply>>> {
    let service = ThreadService::new(state.service_context());
    let replies = service
        .list_replies(channel_id, auth.user_id, thread_id, pagination.page())
        .await?;
    Ok(Json(PaginatedResponse::new(replies, pagination.limit, pagination.offset)))
}

/// Edit a reply (author only)
///
/// PATCH /channels/{channel_id}/threads/{thread_id}/replies/{reply_id}
pub async fn update_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id, reply_id)): ReplyPath,
    ValidatedJson(request): ValidatedJson<UpdateReplyRequest>,
) -> ApiResult<Json<ThreadReply>> {
    let service = ThreadService::new(state.service_context());
    let reply = service
        .update_reply(channel_id, auth.user_id, thread_id, reply_id, request)
        .await?;
    Ok(Json(reply))
}

/// Delete a reply (author or moderator)
///
/// DELETE /channels/{channel_id}/threads/{thread_id}/replies/{reply_id}
pub async fn delete_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id, reply_id)): ReplyPath,
) -> ApiResult<NoContent> {
    let service = ThreadService::new(state.service_context());
    service
        .delete_reply(channel_id, auth.user_id, thread_id, reply_id)
        .await?;
    Ok(NoContent)
}

/// Follow thread
///
/// PUT /channels/{channel_id}/threads/{thread_id}/follow
pub async fn follow_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
) -> ApiResult<Json<ThreadFollower>> {
    let service = ThreadService::new(state.service_context());
    let follower = service.follow_thread(channel_id, auth.user_id, thread_id).await?;
    Ok(Json(follower))
}

/// Unfollow thread
///
/// DELETE /channels/{channel_id}/threads/{thread_id}/follow
pub async fn unfollow_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, thread_id)): ThreadPath,
) -> ApiResult<NoContent> {
    let service = ThreadService::new(state.service_context());
    service.unfollow_thread(channel_id, auth.user_id, thread_id).await?;
    Ok(NoContent)
}
