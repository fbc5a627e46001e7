//! Webhook, permission override, and settings handlers
//!
//! Everything here except reading settings needs owner or admin.

use axum::{extract::State, Json};
use channel_core::{ChannelSettings, PermissionOverride, Snowflake, Webhook};
use channel_service::dto::{
    CreateWebhookRequest, SetPermissionRequest, UpdateSettingsRequest, UpdateWebhookRequest,
};
use channel_service::services::{PermissionService, SettingsService, WebhookService};

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Webhooks
// ============================================================================

/// Create webhook
///
/// POST /channels/{channel_id}/webhooks
pub async fn create_webhook(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateWebhookRequest>,
) -> ApiResult<Created<Json<Webhook>>> {
    let service = WebhookService::new(state.service_context());
    let webhook = service.create_webhook(channel_id, auth.user_id, request).await?;
    Ok(Created(Json(webhook)))
}

/// List webhooks
///
/// GET /channels/{channel_id}/webhooks
pub async fn list_webhooks(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<Webhook>>> {
    let service = WebhookService::new(state.service_context());
    let webhooks = service.list_webhooks(channel_id, auth.user_id).await?;
    Ok(Json(webhooks))
}

/// Update webhook
///
/// PATCH /channels/{channel_id}/webhooks/{webhook_id}
pub async fn update_webhook(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, webhook_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<UpdateWebhookRequest>,
) -> ApiResult<Json<Webhook>> {
    let service = WebhookService::new(state.service_context());
    let webhook = service
        .update_webhook(channel_id, auth.user_id, webhook_id, request)
        .await?;
    Ok(Json(webhook))
}

/// Delete webhook
///
/// DELETE /channels/{channel_id}/webhooks/{webhook_id}
pub async fn delete_webhook(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, webhook_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = WebhookService::new(state.service_context());
    service.delete_webhook(channel_id, auth.user_id, webhook_id).await?;
    Ok(NoContent)
}

/// Fire a test delivery
///
/// POST /channels/{channel_id}/webhooks/{webhook_id}/test
pub async fn test_webhook(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, webhook_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<Webhook>> {
    let service = WebhookService::new(state.service_context());
    let webhook = service.test_webhook(channel_id, auth.user_id, webhook_id).await?;
    Ok(Json(webhook))
}

// ============================================================================
// Permission overrides
// ============================================================================

/// Upsert a permission override
///
/// PUT /channels/{channel_id}/permissions
pub async fn set_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<SetPermissionRequest>,
) -> ApiResult<Json<PermissionOverride>> {
    let service = PermissionService::new(state.service_context());
    let permission = service.set_permission(channel_id, auth.user_id, request).await?;
    Ok(Json(permission))
}

/// List permission overrides
///
/// GET /channels/{channel_id}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<PermissionOverride>>> {
    let service = PermissionService::new(state.service_context());
    let permissions = service.list_permissions(channel_id, auth.user_id).await?;
    Ok(Json(permissions))
}

/// Delete a permission override
///
/// DELETE /channels/{channel_id}/permissions/{permission_id}
pub async fn delete_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((channel_id, permission_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = PermissionService::new(state.service_context());
    service
        .delete_permission(channel_id, auth.user_id, permission_id)
        .await?;
    Ok(NoContent)
}

// ============================================================================
// Settings
// ============================================================================

/// Get settings; defaults when none were saved
///
/// GET /channels/{channel_id}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ChannelSettings>> {
    let service = SettingsService::new(state.service_context());
    let settings = service.get_settings(channel_id, auth.user_id).await?;
    Ok(Json(settings))
}

/// Patch settings
///
/// PATCH /channels/{channel_id}/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(channel_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdateSettingsRequest>,
) -> ApiResult<Json<ChannelSettings>> {
    let service = SettingsService::new(state.service_context());
    let settings = service.update_settings(channel_id, auth.user_id, request).await?;
    Ok(Json(settings))
}
