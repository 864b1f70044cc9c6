//! Admin user repository for database operations.
//!
//! The API only reads `admin_users`; `create` and `list_all` exist for the
//! operator CLI that seeds accounts.

use school_admin_core::{AdminRole, AdminUserId};

use super::{Database, RepositoryError, map_write_error, release};
use crate::models::admin_user::{AdminUser, NewAdminUser};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `SQLite` admin user queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AdminUserRow {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) password_hash: String,
    pub(crate) role: Option<String>,
    pub(crate) is_active: Option<i64>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        if row.username.is_empty() {
            return Err(RepositoryError::DataCorruption(format!(
                "admin user {} has an empty username",
                row.id
            )));
        }

        let role = row
            .role
            .as_deref()
            .map(str::parse::<AdminRole>)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: AdminUserId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active.is_none_or(|flag| flag != 0),
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin user database operations.
pub struct AdminUserRepository<'a> {
    db: &'a Database,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get an admin user by exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the connection or query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let mut conn = self.db.connect().await?;

        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, username, password_hash, role, is_active
            FROM admin_users
            WHERE username = ?
            ",
        )
        .bind(username)
        .fetch_optional(&mut conn)
        .await
        .map_err(RepositoryError::from);

        let row = release(conn, row).await?;
        row.map(TryInto::try_into).transpose()
    }

    /// List all admin users ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the connection or query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let mut conn = self.db.connect().await?;

        let rows = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, username, password_hash, role, is_active
            FROM admin_users
            ORDER BY id ASC
            ",
        )
        .fetch_all(&mut conn)
        .await
        .map_err(RepositoryError::from);

        let rows = release(conn, rows).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user: &NewAdminUser<'_>) -> Result<AdminUser, RepositoryError> {
        let mut conn = self.db.connect().await?;

        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            INSERT INTO admin_users (username, password_hash, full_name, role, is_active)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, password_hash, role, is_active
            ",
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.full_name)
        .bind(user.role.as_str())
        .bind(i64::from(user.is_active))
        .fetch_one(&mut conn)
        .await
        .map_err(|e| map_write_error(e, "username"));

        release(conn, row).await?.try_into()
    }
}
