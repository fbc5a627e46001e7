//! Poll handlers

use axum::{extract::State, Json};
use channel_core::{Poll, Snowflake};
use channel_service::dto::{CreatePollRequest, PollResponse, PollResultsResponse, VoteRequest};
use channel_service::services::PollService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

type PollPath = SnowflakePath<(Snowflake, Snowflake)>;

/// Create poll
///
/// POST /channels/{channel_id}/polls
pub async fn create_poll(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreatePollRequest>,
) -> ApiResult<Created<Json<PollResponse>>> {
    let service = PollService::new(state.service_context());
    let poll = service.create_poll(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(poll)))
}

/// List polls
///
/// GET /channels/{channel_id}/polls
pub async fn list_polls(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Poll>>> {
    let service = PollService::new(state.service_context());
    let polls = service.list_polls(channel_id, auth.user_id).await?;
    Ok(Json(polls))
}

/// Get poll with its options
///
/// GET /channels/{channel_id}/polls/{poll_id}
pub async fn get_poll(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, poll_id)): PollPath,
) -> ApiResult<Json<PollResponse>> {
    let service = PollService::new(state.service_context());
    let poll = service.get_poll(channel_id, auth.user_id, poll_id).await?;
    Ok(Json(poll))
}

/// Cast votes
///
/// POST /channels/{channel_id}/polls/{poll_id}/votes
pub async fn vote(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, poll_id)): PollPath,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<NoContent> {
    let service = PollService::new(state.service_context());
    service.vote(channel_id, auth.user_id, poll_id, request).await?;
    Ok(NoContent)
}

/// Close poll (creator or moderator)
///
/// POST /channels/{channel_id}/polls/{poll_id}/close
pub async fn close_poll(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, poll_id)): PollPath,
) -> ApiResult<NoContent> {
    let service = PollService::new(state.service_context());
    service.close_poll(channel_id, auth.user_id, poll_id).await?;
    Ok(NoContent)
}

/// Vote tallies
///
/// GET /channels/{channel_id}/polls/{poll_id}/results
pub async fn get_results(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, poll_id)): PollPath,
) -> ApiResult<Json<PollResultsResponse>> {
    let service = PollService::new(state.service_context());
    let results = service.get_results(channel_id, auth.user_id, poll_id).await?;
    Ok(Json(results))
}
