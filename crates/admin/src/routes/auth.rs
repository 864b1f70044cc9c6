//! Login and session handlers.
//!
//! Request bodies are parsed leniently: a missing, malformed, oversized, or
//! non-object JSON body counts as `{}` so bad input ends in a 401, not a 400.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use school_admin_core::{AdminRole, AdminUserId};

use crate::{
    error::AppError,
    middleware::BearerToken,
    models::{AdminUser, ClientContext, iso_timestamp},
    services::{AdminAuthService, IssuedSession},
    state::AppState,
};

/// Credentials pulled from a login or session request body.
#[derive(Default, PartialEq, Eq)]
pub struct CredentialsBody {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsBody")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialsBody {
    /// Parse a request body, never failing.
    ///
    /// The username is trimmed; the password is kept verbatim.
    #[must_use]
    pub fn from_bytes(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        Self {
            username: lenient_string(fields.get("username")).trim().to_owned(),
            password: lenient_string(fields.get("password")),
        }
    }

    /// Parse an extracted body; a body that could not be read counts as empty.
    #[must_use]
    pub fn from_body(body: Result<Bytes, BytesRejection>) -> Self {
        match body {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Unreadable request body treated as empty");
                Self::default()
            }
        }
    }
}

/// Read a JSON value as a string: strings as-is, scalars via their JSON text.
fn lenient_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

/// User summary returned alongside a session.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: AdminUserId,
    pub username: String,
    pub role: Option<AdminRole>,
}

impl From<AdminUser> for SessionUser {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Response for a newly issued session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    pub token: String,
    pub expires_at: String,
    pub user: SessionUser,
}

impl From<IssuedSession> for SessionResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            ok: true,
            token: issued.token.into_inner(),
            expires_at: issued.expires_at,
            user: issued.user.into(),
        }
    }
}

/// Response for a validated session.
#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub ok: bool,
    pub expires_at: String,
    pub user: SessionUser,
}

/// Log in with username and password.
///
/// POST /api/admin/login
///
/// # Errors
///
/// Returns `AppError::Unauthorized` for unknown users and for any
/// credentials the server cannot accept.
/// Returns `AppError::Database` if storage fails.
#[instrument(skip(state, body), fields(username = tracing::field::Empty))]
pub async fn login(
    State(state): State<AppState>,
    client: ClientContext,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let credentials = CredentialsBody::from_body(body);
    tracing::Span::current().record("username", credentials.username.as_str());

    let issued = AdminAuthService::new(state.database())
        .login(&credentials.username, &credentials.password, &client)
        .await?;

    Ok(Json(issued.into()))
}

/// Issue a session for a user the client has already verified.
///
/// POST /api/admin/session
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the user is unknown or inactive.
/// Returns `AppError::Database` if storage fails.
#[instrument(skip(state, body), fields(username = tracing::field::Empty))]
pub async fn create_session(
    State(state): State<AppState>,
    client: ClientContext,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let CredentialsBody { username, .. } = CredentialsBody::from_body(body);
    tracing::Span::current().record("username", username.as_str());

    let issued = AdminAuthService::new(state.database())
        .create_session(&username, &client)
        .await?;

    Ok(Json(issued.into()))
}

/// Check the presented bearer token.
///
/// GET /api/admin/session
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the token is missing, unknown, or
/// expired, or the account is inactive.
/// Returns `AppError::Database` if storage fails.
#[instrument(skip_all)]
pub async fn current_session(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<CurrentSessionResponse>, AppError> {
    let (session, user) = AdminAuthService::new(state.database())
        .validate_session(&token)
        .await?;

    Ok(Json(CurrentSessionResponse {
        ok: true,
        expires_at: iso_timestamp(session.expires_at),
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_object_body() {
        let body = CredentialsBody::from_bytes(br#"{"username":" admin ","password":" admin123"}"#);
        assert_eq!(body.username, "admin");
        assert_eq!(body.password, " admin123");
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert_eq!(
            CredentialsBody::from_bytes(b"{not json"),
            CredentialsBody::default()
        );
        assert_eq!(CredentialsBody::from_bytes(b""), CredentialsBody::default());
    }

    #[test]
    fn test_non_object_json_is_empty() {
        assert_eq!(
            CredentialsBody::from_bytes(br#"["admin","admin123"]"#),
            CredentialsBody::default()
        );
        assert_eq!(
            CredentialsBody::from_bytes(br#""admin""#),
            CredentialsBody::default()
        );
    }

    #[test]
    fn test_scalars_are_stringified() {
        let body = CredentialsBody::from_bytes(br#"{"username":42,"password":true}"#);
        assert_eq!(body.username, "42");
        assert_eq!(body.password, "true");
    }

    #[test]
    fn test_null_and_nested_fields_are_empty() {
        let body = CredentialsBody::from_bytes(br#"{"username":null,"password":{"a":1}}"#);
        assert_eq!(body, CredentialsBody::default());
    }

    #[test]
    fn test_extracted_body_is_parsed() {
        let body = CredentialsBody::from_body(Ok(Bytes::from_static(
            br#"{"username":"admin","password":"admin123"}"#,
        )));
        assert_eq!(body.username, "admin");
        assert_eq!(body.password, "admin123");
    }

    #[test]
    fn test_debug_redacts_password() {
        let body = CredentialsBody::from_bytes(br#"{"username":"admin","password":"admin123"}"#);
        let debug = format!("{body:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("admin123"));
    }
}
