//! Tower layers wrapped around the versioned API router.
//!
//! Outermost first: rate limit, request id, trace span, timeout, CORS.

mod cors;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, StatusCode},
    Router,
};
use channel_common::{AppConfig, AppError, RateLimitConfig};
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::state::AppState;

pub use cors::cors_layer;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests still running after this answer 503
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wrap `router` with the service-wide layer stack
pub fn with_layers(router: Router<AppState>, config: &AppConfig) -> Result<Router<AppState>, AppError> {
    check_rate_limit(&config.rate_limit)?;
    // One token bucket shared by every caller
    let limiter = GovernorConfigBuilder::default()
        .per_second(u64::from(config.rate_limit.requests_per_second))
        .burst_size(config.rate_limit.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish()
        .ok_or_else(|| AppError::Config("rate limiter rejected its settings".to_string()))?;
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Added innermost first
    Ok(router
        .layer(cors_layer(&config.cors, config.app.env.is_production()))
        .layer(TimeoutLayer::with_status_code(StatusCode::SERVICE_UNAVAILABLE, REQUEST_TIMEOUT))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(GovernorLayer {
            config: Arc::new(limiter),
        }))
}

/// The governor builder refuses a zero rate or burst; name the bad value instead
fn check_rate_limit(limits: &RateLimitConfig) -> Result<(), AppError> {
    if limits.requests_per_second == 0 || limits.burst == 0 {
        return Err(AppError::Config(format!(
            "rate limit of {}/s with burst {} is not usable",
            limits.requests_per_second, limits.burst
        )));
    }
    Ok(())
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}
