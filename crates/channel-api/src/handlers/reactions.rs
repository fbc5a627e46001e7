//! Reaction handlers
//!
//! Emoji reactions on channel messages.

use axum::{extract::State, Json};
use channel_core::{Reaction, ReactionSummary, Snowflake};
use channel_service::dto::AddReactionRequest;
use channel_service::services::ReactionService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

type MessagePath = SnowflakePath<(Snowflake, Snowflake)>;

/// Add reaction
///
/// POST /channels/{channel_id}/messages/{message_id}/reactions
pub async fn add_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): MessagePath,
    ValidatedJson(request): ValidatedJson<AddReactionRequest>,
) -> ApiResult<Created<Json<Reaction>>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service
        .add_reaction(channel_id, message_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(reaction)))
}

/// Remove the caller's reaction
///
/// DELETE /channels/{channel_id}/messages/{message_id}/reactions/{emoji}
pub async fn remove_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id, emoji)): SnowflakePath<(Snowflake, Snowflake, String)>,
) -> ApiResult<NoContent> {
    let service = ReactionService::new(state.service_context());
    service
        .remove_reaction(channel_id, message_id, auth.user_id, &emoji)
        .await?;
    Ok(NoContent)
}

/// List reactions on a message
///
/// GET /channels/{channel_id}/messages/{message_id}/reactions
pub async fn list_reactions(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): MessagePath,
) -> ApiResult<Json<Vec<Reaction>>> {
    let service = ReactionService::new(state.service_context());
    let reactions = service.list_reactions(channel_id, message_id, auth.user_id).await?;
    Ok(Json(reactions))
}

/// Per-emoji counts
///
/// GET /channels/{channel_id}/messages/{message_id}/reaction-summary
pub async fn reaction_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, message_id)): MessagePath,
) -> ApiResult<Json<Vec<ReactionSummary>>> {
    let service = ReactionService::new(state.service_context());
    let summary = service.reaction_summary(channel_id, message_id, auth.user_id).await?;
    Ok(Json(summary))
}
