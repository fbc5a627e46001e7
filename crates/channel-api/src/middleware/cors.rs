//! Cross-origin policy.

use axum::http::{header, HeaderName, HeaderValue, Method};
use channel_common::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::REQUEST_ID_HEADER;

/// CORS for the API routes
///
/// A wildcard (or an empty list) opens every origin, except in production
/// where only explicitly listed origins pass.
pub fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id]);

    if config.allows_any() && !is_production {
        tracing::warn!("CORS open to any origin; set CORS_ALLOWED_ORIGINS before deploying");
        return layer.allow_origin(Any);
    }

    let origins = listed_origins(config);
    if origins.is_empty() {
        tracing::warn!("No CORS origins configured; browsers on other origins will be refused");
    }
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Parseable, non-wildcard origins from the config
fn listed_origins(config: &CorsConfig) -> Vec<HeaderValue> {
    config
        .allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping malformed CORS origin");
                None
            }
        })
        .collect()
}
