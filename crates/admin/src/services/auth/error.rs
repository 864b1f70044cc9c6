//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
///
/// The `Display` text of each variant is the message returned to clients.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Login attempted for a username with no account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The server cannot verify this password; the client must verify it
    /// against the hash and then call session creation.
    #[error("Server-side bcrypt not available in preview")]
    VerificationUnavailable,

    /// Session creation for a missing or deactivated account.
    #[error("User not active or not found")]
    UserNotActiveOrNotFound,

    /// No bearer token on the request.
    #[error("No session token provided")]
    MissingSessionToken,

    /// Token unknown, malformed, or owned by a deactivated account.
    #[error("Invalid session")]
    InvalidSession,

    /// Token known but past its expiry.
    #[error("Session expired")]
    SessionExpired,

    /// Repository/database error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}
