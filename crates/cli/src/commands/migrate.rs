//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! school-admin migrate
//! school-admin migrate --db /var/lib/school/school_schedule.db
//! ```
//!
//! # Migration Files
//!
//! Admin migrations: `crates/admin/migrations/` (embedded at build time)

use school_admin_api::db::{Database, RepositoryError};

/// Apply all pending migrations to `db`.
///
/// # Errors
///
/// Returns `RepositoryError` if the file cannot be created or a migration fails.
pub async fn run(db: &Database) -> Result<(), RepositoryError> {
    tracing::info!(path = %db.path().display(), "Running admin migrations...");
    db.migrate().await?;
    tracing::info!("Admin migrations complete!");
    Ok(())
}
