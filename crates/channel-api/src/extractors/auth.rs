//! Bearer-token identity.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use channel_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// The acting user, taken from the access token's subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(TypedHeader(Authorization(bearer))) =
            Option::<TypedHeader<Authorization<Bearer>>>::from_request_parts(parts, state)
                .await
                .ok()
                .flatten()
        else {
            return Err(ApiError::MissingAuth);
        };

        match state.jwt_service().authenticate(bearer.token()) {
            Ok(user_id) => Ok(Self { user_id }),
            Err(e) => {
                tracing::warn!(error = %e, path = %parts.uri.path(), "Rejected bearer token");
                Err(ApiError::App(e))
            }
        }
    }
}
