//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use axum::{extract::State, http::StatusCode, Json};
use channel_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.config().app.name.clone()))
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = channel_db::ping(state.pool()).await.is_ok();

    let redis_healthy = match state.redis_pool() {
        Some(pool) => Some(pool.ping().await.is_ok()),
        None => None,
    };

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
