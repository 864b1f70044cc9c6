//! Unified error handling for the admin API.
//!
//! Every failure leaves the handler as a JSON envelope
//! `{"ok": false, "error": "<message>"}` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::AdminAuthError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed (connectivity, constraint, or decoding).
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource or route not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials, account state, or session rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl AppError {
    /// Status code sent to the client.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message sent to the client.
    ///
    /// Storage failures carry the raw error text; nothing is scrubbed.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Database(err) => err.to_string(),
            Self::NotFound(msg) | Self::Unauthorized(msg) => msg.clone(),
        }
    }
}

impl From<AdminAuthError> for AppError {
    fn from(err: AdminAuthError) -> Self {
        match err {
            AdminAuthError::Repository(e) => Self::Database(e),
            other => Self::Unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let body = ErrorBody {
            ok: false,
            error: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");

        let err = AppError::Unauthorized("Invalid credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");
    }

    #[test]
    fn test_app_error_status_codes() {
        // Test that errors map to correct HTTP status codes
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict("session".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_has_no_variant_prefix() {
        let err = AppError::Unauthorized("Invalid session".to_string());
        assert_eq!(err.message(), "Invalid session");
    }

    #[test]
    fn test_storage_message_is_raw_error_text() {
        let err = AppError::Database(RepositoryError::DataCorruption("bad role".to_string()));
        assert_eq!(err.message(), "data corruption: bad role");
    }

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        let err = AppError::from(AdminAuthError::VerificationUnavailable);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Server-side bcrypt not available in preview");

        let err = AppError::from(AdminAuthError::Repository(RepositoryError::DataCorruption(
            "bad role".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
