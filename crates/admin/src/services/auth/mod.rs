//! Admin authentication service.
//!
//! Issues opaque bearer sessions and validates them. The server never hashes
//! or compares passwords: clients fetch the stored bcrypt hash, verify it
//! themselves, and then ask for a session.
//!
//! # Security
//!
//! **PREVIEW ONLY:** `login` accepts exactly one hardcoded credential pair
//! (`admin` / `admin123`) for an active `admin` account. Every other
//! username/password combination is rejected with
//! [`AdminAuthError::VerificationUnavailable`]. This is a stand-in for real
//! server-side verification and must not be treated as the long-term
//! contract. The server logs a warning about it at startup.

mod error;

pub use error::AdminAuthError;

use chrono::{DateTime, TimeDelta, Utc};

use school_admin_core::{AdminSessionId, SessionToken};

use crate::db::{AdminSessionRepository, AdminUserRepository, Database};
use crate::models::{AdminSession, AdminUser, ClientContext, NewAdminSession, iso_timestamp};

/// The only username `login` will accept.
pub const PREVIEW_USERNAME: &str = "admin";

/// The only password `login` will accept.
pub const PREVIEW_PASSWORD: &str = "admin123";

/// Lifetime of an issued session.
pub const SESSION_TTL_HOURS: i64 = 24;

/// A freshly issued session, ready to hand to the client.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Database ID of the new session row.
    pub id: AdminSessionId,
    /// Bearer token.
    pub token: SessionToken,
    /// Expiry in the wire/storage format.
    pub expires_at: String,
    /// The user the session belongs to.
    pub user: AdminUser,
}

/// Returns true for the single preview credential pair.
#[must_use]
pub fn is_preview_credentials(username: &str, password: &str) -> bool {
    username == PREVIEW_USERNAME && password == PREVIEW_PASSWORD
}

/// Expiry for a session issued at `issued_at`.
#[must_use]
pub fn session_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + TimeDelta::hours(SESSION_TTL_HOURS)
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    users: AdminUserRepository<'a>,
    sessions: AdminSessionRepository<'a>,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            users: AdminUserRepository::new(db),
            sessions: AdminSessionRepository::new(db),
        }
    }

    /// Authenticate with username and password and issue a session.
    ///
    /// See the module docs for the preview-only policy.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` if the username is unknown.
    /// Returns `AdminAuthError::VerificationUnavailable` for any other
    /// credentials, or if the account is inactive.
    /// Returns `AdminAuthError::Repository` if storage fails.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client: &ClientContext,
    ) -> Result<IssuedSession, AdminAuthError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or(AdminAuthError::InvalidCredentials)?;

        if !(is_preview_credentials(username, password) && user.is_active) {
            tracing::debug!(user_id = %user.id, "Login rejected: password not verifiable on server");
            return Err(AdminAuthError::VerificationUnavailable);
        }

        let issued = self.issue(user, client).await?;
        tracing::info!(user_id = %issued.user.id, session_id = %issued.id, "Admin logged in");
        Ok(issued)
    }

    /// Issue a session for a user the caller has already verified.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::UserNotActiveOrNotFound` if the username is
    /// unknown or the account is inactive.
    /// Returns `AdminAuthError::Repository` if storage fails.
    pub async fn create_session(
        &self,
        username: &str,
        client: &ClientContext,
    ) -> Result<IssuedSession, AdminAuthError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AdminAuthError::UserNotActiveOrNotFound)?;

        let issued = self.issue(user, client).await?;
        tracing::info!(user_id = %issued.user.id, session_id = %issued.id, "Admin session created");
        Ok(issued)
    }

    /// Look up a bearer token and check it is still usable.
    ///
    /// Expired sessions are reported but left in place.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidSession` if the token is unknown or
    /// the account is inactive.
    /// Returns `AdminAuthError::SessionExpired` if the session has expired.
    /// Returns `AdminAuthError::Repository` if storage fails.
    pub async fn validate_session(
        &self,
        token: &SessionToken,
    ) -> Result<(AdminSession, AdminUser), AdminAuthError> {
        let (session, user) = self
            .sessions
            .get_with_user_by_token(token)
            .await?
            .ok_or(AdminAuthError::InvalidSession)?;

        if !user.is_active {
            return Err(AdminAuthError::InvalidSession);
        }

        if session.is_expired_at(Utc::now()) {
            return Err(AdminAuthError::SessionExpired);
        }

        Ok((session, user))
    }

    async fn issue(
        &self,
        user: AdminUser,
        client: &ClientContext,
    ) -> Result<IssuedSession, AdminAuthError> {
        let token = SessionToken::generate();
        let expires_at = iso_timestamp(session_expiry(Utc::now()));

        let id = self
            .sessions
            .insert(&NewAdminSession {
                admin_user_id: user.id,
                token: &token,
                expires_at: &expires_at,
                ip_address: client.ip_address.as_deref(),
                user_agent: &client.user_agent,
            })
            .await?;

        Ok(IssuedSession {
            id,
            token,
            expires_at,
            user,
        })
    }
}
