//! Authentication extractors for admin.
//!
//! Provides an extractor for pulling the bearer session token off a request.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use school_admin_core::SessionToken;

use crate::error::AppError;
use crate::services::AdminAuthError;

/// Alternate header carrying the session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Extractor that requires a bearer session token.
///
/// Looks at `Authorization: Bearer <token>` first, then `X-Session-Token`.
/// Only the token's shape is checked here; whether it names a live session
/// is up to the handler.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     BearerToken(token): BearerToken,
/// ) -> impl IntoResponse {
///     // look the token up...
/// }
/// ```
pub struct BearerToken(pub SessionToken);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::from(AdminAuthError::MissingSessionToken))?;

        let token =
            SessionToken::parse(raw).map_err(|_| AppError::from(AdminAuthError::InvalidSession))?;

        Ok(Self(token))
    }
}

fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then_some(token)
        });

    bearer
        .or_else(|| {
            headers
                .get(SESSION_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
        })
        .filter(|token| !token.trim().is_empty())
}
