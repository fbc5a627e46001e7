//! Channel template handlers

use axum::{extract::State, Json};
use channel_core::{Channel, ChannelTemplate, Snowflake};
use channel_service::dto::{
    ApplyTemplateRequest, CreateTemplateFromChannelRequest, CreateTemplateRequest,
    UpdateTemplateRequest,
};
use channel_service::services::TemplateService;

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create template
///
/// POST /templates
pub async fn create_template(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTemplateRequest>,
) -> ApiResult<Created<Json<ChannelTemplate>>> {
    let service = TemplateService::new(state.service_context());
    let template = service.create_template(auth.user_id, request).await?;
    Ok(Created(Json(template)))
}

/// Capture an existing channel as a template
///
/// POST /channels/{channel_id}/templates
pub async fn create_from_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateTemplateFromChannelRequest>,
) -> ApiResult<Created<Json<ChannelTemplate>>> {
    let service = TemplateService::new(state.service_context());
    let template = service
        .create_from_channel(channel_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(template)))
}

/// Get template
///
/// GET /templates/{template_id}
pub async fn get_template(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(template_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ChannelTemplate>> {
    let service = TemplateService::new(state.service_context());
    let template = service.get_template(template_id).await?;
    Ok(Json(template))
}

/// List workspace templates
///
/// GET /workspaces/{workspace_id}/templates
pub async fn list_templates(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(workspace_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<ChannelTemplate>>> {
    let service = TemplateService::new(state.service_context());
    let templates = service.list_templates(workspace_id).await?;
    Ok(Json(templates))
}

/// Update template (creator only)
///
/// PATCH /templates/{template_id}
pub async fn update_template(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(template_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdateTemplateRequest>,
) -> ApiResult<Json<ChannelTemplate>> {
    let service = TemplateService::new(state.service_context());
    let template = service.update_template(auth.user_id, template_id, request).await?;
    Ok(Json(template))
}

/// Delete template (creator only)
///
/// DELETE /templates/{template_id}
pub async fn delete_template(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(template_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = TemplateService::new(state.service_context());
    service.delete_template(auth.user_id, template_id).await?;
    Ok(NoContent)
}

/// Create a channel from a template
///
/// POST /templates/{template_id}/apply
pub async fn apply_template(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(template_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<ApplyTemplateRequest>,
) -> ApiResult<Created<Json<Channel>>> {
    let service = TemplateService::new(state.service_context());
    let channel = service.apply_template(auth.user_id, template_id, request).await?;
    Ok(Created(Json(channel)))
}
