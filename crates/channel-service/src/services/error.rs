//! Service layer error types
//!
//! Services fail with a domain rule, an application error bubbled up from a
//! shared component, or an input problem caught before touching storage.

use channel_common::{domain_status, AppError};
use channel_core::DomainError;
use thiserror::Error;
use validator::ValidationErrors;

/// Service layer error type
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    /// Cross-field rule the request DTO cannot express
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-field failures from a request DTO
    #[error("Validation error: {0}")]
    Fields(#[from] ValidationErrors),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Field-level details for error bodies
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Fields(errors) => Some(errors),
            _ => None,
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::Validation(_) | Self::Fields(_) => 400,
        }
    }

    /// Stable code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) | Self::Fields(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Fields(errors) => AppError::Validation(errors.to_string()),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
