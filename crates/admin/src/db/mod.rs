//! Database operations for the admin `SQLite` store.
//!
//! # Tables
//!
//! - `admin_users` - Admin identities (seeded out-of-band, read-only for the API)
//! - `admin_sessions` - Bearer sessions issued by login / session creation
//!
//! # Connections
//!
//! There is no pool. Every repository call opens its own connection with
//! foreign keys enabled and closes it before returning, on success and on
//! error alike.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p school-admin-cli -- migrate
//! ```
//! The API server never applies them.

pub mod admin_sessions;
pub mod admin_users;

use std::path::{Path, PathBuf};

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use thiserror::Error;

pub use admin_sessions::AdminSessionRepository;
pub use admin_users::AdminUserRepository;

/// Embedded schema migrations for the admin tables.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username, dangling foreign key).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Location of the admin `SQLite` database.
///
/// Cheap to clone; holds only the path. Connections are opened on demand.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create a handle for the database file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the database, without its directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(
                || self.path.to_string_lossy(),
                |name| name.to_string_lossy(),
            )
            .into_owned()
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .foreign_keys(true)
            .create_if_missing(false)
    }

    /// Open a new connection with foreign-key enforcement enabled.
    ///
    /// The database file must already exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the file cannot be opened.
    pub async fn connect(&self) -> Result<SqliteConnection, RepositoryError> {
        let conn = SqliteConnection::connect_with(&self.connect_options()).await?;
        Ok(conn)
    }

    /// Apply the embedded migrations, creating the database file if needed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the file cannot be created or
    /// opened, or `RepositoryError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }

        let options = self.connect_options().create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        let result = MIGRATOR.run(&mut conn).await;
        release(conn, result.map_err(RepositoryError::from)).await
    }
}

/// Close `conn` and pass `result` through.
///
/// A failed close only matters when the operation itself succeeded; on the
/// error path the original error wins.
pub(crate) async fn release<T>(
    conn: SqliteConnection,
    result: Result<T, RepositoryError>,
) -> Result<T, RepositoryError> {
    match result {
        Ok(value) => {
            conn.close().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(close_err) = conn.close().await {
                tracing::debug!(error = %close_err, "Failed to close connection after error");
            }
            Err(err)
        }
    }
}

/// Map constraint violations from a write to `RepositoryError::Conflict`.
pub(crate) fn map_write_error(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{what} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::Conflict(format!("{what} references a missing record"));
        }
    }
    RepositoryError::Database(err)
}
