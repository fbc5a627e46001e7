//! Handler results and the JSON error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use channel_common::{domain_status, AppError};
use channel_core::DomainError;
use channel_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Which part of the request failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    Path,
    Query,
    Body,
}

impl Malformed {
    fn code(self) -> &'static str {
        match self {
            Self::Path => "INVALID_PATH_PARAMETER",
            Self::Query => "INVALID_QUERY_PARAMETER",
            Self::Body => "INVALID_REQUEST_BODY",
        }
    }
}

/// Every failure a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    Malformed { part: Malformed, message: String },

    #[error("Missing authorization header")]
    MissingAuth,
}

impl ApiError {
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::Malformed { part: Malformed::Path, message: msg.into() }
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::Malformed { part: Malformed::Query, message: msg.into() }
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::Malformed { part: Malformed::Body, message: msg.into() }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Service(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::Domain(e) => domain_status(e),
            Self::Validation(_) | Self::Malformed { .. } => 400,
            Self::MissingAuth => 401,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::App(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Malformed { part, .. } => part.code(),
            Self::MissingAuth => "MISSING_AUTHORIZATION",
        }
    }

    /// Per-field validation failures, when there are any
    fn details(&self) -> Option<serde_json::Value> {
        let errors = match self {
            Self::Validation(errors) => errors,
            Self::Service(e) => e.field_errors()?,
            _ => return None,
        };
        serde_json::to_value(errors).ok()
    }
}

/// `{"error": {...}}` envelope
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "Request failed");
        }

        let envelope = Envelope {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        (status, Json(envelope)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
