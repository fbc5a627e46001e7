//! Pagination extractor
//!
//! Extracts limit/offset pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use channel_core::Page;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 50;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
    /// Number of items to skip
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Clamped to 1-100
    pub limit: i64,
    /// Never negative
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Create pagination with only a limit
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: 0,
        }
    }

    pub fn page(self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

impl PaginationParams {
    /// Clamp into a window, using `default_limit` when no limit was given
    pub fn resolve(self, default_limit: i64) -> Pagination {
        Pagination {
            limit: self.limit.unwrap_or(default_limit).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        params.resolve(DEFAULT_LIMIT)
    }
}

/// Raw parameters, for routes whose default page size differs
#[async_trait]
impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(params)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        PaginationParams::from_request_parts(parts, state).await.map(Pagination::from)
    }
}
