//! Admin session repository for database operations.
//!
//! Sessions are append-only: the API inserts rows and reads them back for
//! validation, but never updates or deletes them.

use chrono::{DateTime, NaiveDateTime, Utc};

use school_admin_core::{AdminSessionId, AdminUserId, SessionToken};

use super::admin_users::AdminUserRow;
use super::{Database, RepositoryError, map_write_error, release};
use crate::models::{AdminSession, AdminUser, NewAdminSession};

/// Internal row type for a session joined with its owning user.
#[derive(Debug, sqlx::FromRow)]
struct SessionWithUserRow {
    session_id: i64,
    admin_user_id: i64,
    session_token: String,
    expires_at: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: Option<NaiveDateTime>,
    username: String,
    password_hash: String,
    role: Option<String>,
    is_active: Option<i64>,
}

impl TryFrom<SessionWithUserRow> for (AdminSession, AdminUser) {
    type Error = RepositoryError;

    fn try_from(row: SessionWithUserRow) -> Result<Self, Self::Error> {
        let token = SessionToken::parse(&row.session_token).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid token for session {}: {e}",
                row.session_id
            ))
        })?;

        let expires_at = DateTime::parse_from_rfc3339(&row.expires_at)
            .map_err(|e| {
                RepositoryError::DataCorruption(format!(
                    "invalid expires_at for session {}: {e}",
                    row.session_id
                ))
            })?
            .with_timezone(&Utc);

        let session = AdminSession {
            id: AdminSessionId::new(row.session_id),
            admin_user_id: AdminUserId::new(row.admin_user_id),
            token,
            expires_at,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at.map(|at| at.and_utc()),
        };

        let user = AdminUser::try_from(AdminUserRow {
            id: row.admin_user_id,
            username: row.username,
            password_hash: row.password_hash,
            role: row.role,
            is_active: row.is_active,
        })?;

        Ok((session, user))
    }
}

/// Repository for admin session database operations.
pub struct AdminSessionRepository<'a> {
    db: &'a Database,
}

impl<'a> AdminSessionRepository<'a> {
    /// Create a new admin session repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new session row and commit it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user does not exist or the
    /// token is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(
        &self,
        session: &NewAdminSession<'_>,
    ) -> Result<AdminSessionId, RepositoryError> {
        let mut conn = self.db.connect().await?;

        let result = sqlx::query(
            r"
            INSERT INTO admin_sessions (admin_user_id, session_token, expires_at, ip_address, user_agent)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(session.admin_user_id)
        .bind(session.token.as_str())
        .bind(session.expires_at)
        .bind(session.ip_address)
        .bind(session.user_agent)
        .execute(&mut conn)
        .await
        .map(|done| AdminSessionId::new(done.last_insert_rowid()))
        .map_err(|e| map_write_error(e, "session"));

        release(conn, result).await
    }

    /// Get a session and its owning user by token.
    ///
    /// Returns expired sessions too; callers decide what expiry means.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the connection or query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_with_user_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(AdminSession, AdminUser)>, RepositoryError> {
        let mut conn = self.db.connect().await?;

        let row = sqlx::query_as::<_, SessionWithUserRow>(
            r"
            SELECT s.id AS session_id, s.admin_user_id, s.session_token, s.expires_at,
                   s.ip_address, s.user_agent, s.created_at,
                   u.username, u.password_hash, u.role, u.is_active
            FROM admin_sessions s
            JOIN admin_users u ON u.id = s.admin_user_id
            WHERE s.session_token = ?
            ",
        )
        .bind(token.as_str())
        .fetch_optional(&mut conn)
        .await
        .map_err(RepositoryError::from);

        let row = release(conn, row).await?;
        row.map(TryInto::try_into).transpose()
    }
}
