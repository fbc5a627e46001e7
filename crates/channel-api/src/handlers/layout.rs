//! Tab, section, and channel link handlers

use axum::{extract::State, Json};
use channel_core::{ChannelLink, ChannelTab, Section, Snowflake};
use channel_service::dto::{
    CreateLinkRequest, CreateSectionRequest, CreateTabRequest, ReorderTabsRequest,
    UpdateSectionRequest, UpdateTabRequest,
};
use channel_service::services::{LinkService, SectionService, TabService};

use crate::extractors::{AuthUser, JsonBody, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Tabs
// ============================================================================

/// Add tab at the end
///
/// POST /channels/{channel_id}/tabs
pub async fn add_tab(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateTabRequest>,
) -> ApiResult<Created<Json<ChannelTab>>> {
    let service = TabService::new(state.service_context());
    let tab = service.add_tab(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(tab)))
}

/// List tabs by position
///
/// GET /channels/{channel_id}/tabs
pub async fn list_tabs(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<ChannelTab>>> {
    let service = TabService::new(state.service_context());
    let tabs = service.list_tabs(channel_id, auth.user_id).await?;
    Ok(Json(tabs))
}

/// Update tab
///
/// PATCH /channels/{channel_id}/tabs/{tab_id}
pub async fn update_tab(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, tab_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<UpdateTabRequest>,
) -> ApiResult<Json<ChannelTab>> {
    let service = TabService::new(state.service_context());
    let tab = service.update_tab(channel_id, auth.user_id, tab_id, request).await?;
    Ok(Json(tab))
}

/// Remove tab
///
/// DELETE /channels/{channel_id}/tabs/{tab_id}
pub async fn remove_tab(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, tab_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = TabService::new(state.service_context());
    service.remove_tab(channel_id, auth.user_id, tab_id).await?;
    Ok(NoContent)
}

/// Rewrite tab positions in the given order
///
/// PUT /channels/{channel_id}/tab-order
pub async fn reorder_tabs(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<ReorderTabsRequest>,
) -> ApiResult<Json<Vec<ChannelTab>>> {
    let service = TabService::new(state.service_context());
    let tabs = service.reorder_tabs(channel_id, auth.user_id, request).await?;
    Ok(Json(tabs))
}

// ============================================================================
// Sections
// ============================================================================

/// Create a sidebar section
///
/// POST /sections
pub async fn create_section(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSectionRequest>,
) -> ApiResult<Created<Json<Section>>> {
    let service = SectionService::new(state.service_context());
    let section = service.create_section(auth.user_id, request).await?;
    Ok(Created(Json(section)))
}

/// List the caller's sections in a workspace
///
/// GET /workspaces/{workspace_id}/sections
pub async fn list_sections(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(workspace_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Section>>> {
    let service = SectionService::new(state.service_context());
    let sections = service.list_sections(workspace_id, auth.user_id).await?;
    Ok(Json(sections))
}

/// Update section
///
/// PATCH /sections/{section_id}
pub async fn update_section(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(section_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdateSectionRequest>,
) -> ApiResult<Json<Section>> {
    let service = SectionService::new(state.service_context());
    let section = service.update_section(auth.user_id, section_id, request).await?;
    Ok(Json(section))
}

/// Delete section
///
/// DELETE /sections/{section_id}
pub async fn delete_section(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(section_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = SectionService::new(state.service_context());
    service.delete_section(auth.user_id, section_id).await?;
    Ok(NoContent)
}

// ============================================================================
// Channel links
// ============================================================================

/// Link this channel to another
///
/// POST /channels/{channel_id}/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<CreateLinkRequest>,
) -> ApiResult<Created<Json<ChannelLink>>> {
    let service = LinkService::new(state.service_context());
    let link = service.create_link(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(link)))
}

/// Active links on either side of this channel
///
/// GET /channels/{channel_id}/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<ChannelLink>>> {
    let service = LinkService::new(state.service_context());
    let links = service.list_links(channel_id, auth.user_id).await?;
    Ok(Json(links))
}

/// Get link
///
/// GET /channels/{channel_id}/links/{link_id}
pub async fn get_link(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, link_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<ChannelLink>> {
    let service = LinkService::new(state.service_context());
    let link = service.get_link(channel_id, auth.user_id, link_id).await?;
    Ok(Json(link))
}

/// Deactivate link
///
/// DELETE /channels/{channel_id}/links/{link_id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, link_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = LinkService::new(state.service_context());
    service.delete_link(channel_id, auth.user_id, link_id).await?;
    Ok(NoContent)
}
