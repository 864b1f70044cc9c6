//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! school-admin admin create -u admin -p '$2b$10$...' -n "Head Office" -r super_admin
//!
//! # List admin users
//! school-admin admin list
//! ```
//!
//! The password hash is stored as given. Clients verify passwords against it.

use school_admin_api::db::{AdminUserRepository, Database, RepositoryError};
use school_admin_api::models::NewAdminUser;
use school_admin_core::{AdminRole, AdminUserId};
use thiserror::Error;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: super_admin, admin")]
    InvalidRole(String),

    /// Username is empty after trimming.
    #[error("Username must not be empty")]
    EmptyUsername,

    /// Password hash is empty.
    #[error("Password hash must not be empty")]
    EmptyPasswordHash,

    /// User already exists.
    #[error("Admin user already exists with username: {0}")]
    UserExists(String),
}

/// Create a new admin user.
///
/// # Arguments
///
/// * `username` - Login name (trimmed)
/// * `password_hash` - bcrypt hash, stored verbatim
/// * `full_name` - Optional display name
/// * `role` - Admin's role (`super_admin` or `admin`)
/// * `is_active` - Whether the account may log in
///
/// # Returns
///
/// The ID of the created admin user.
pub async fn create_user(
    db: &Database,
    username: &str,
    password_hash: &str,
    full_name: Option<&str>,
    role: &str,
    is_active: bool,
) -> Result<AdminUserId, AdminError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    let username = username.trim();
    if username.is_empty() {
        return Err(AdminError::EmptyUsername);
    }
    if password_hash.is_empty() {
        return Err(AdminError::EmptyPasswordHash);
    }

    tracing::info!("Creating admin user: {} ({})", username, role);

    let user = AdminUserRepository::new(db)
        .create(&NewAdminUser {
            username,
            password_hash,
            full_name,
            role,
            is_active,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::UserExists(username.to_owned()),
            other => AdminError::Database(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        role
    );
    if !is_active {
        tracing::warn!("User was created inactive and cannot log in until enabled.");
    }

    Ok(user.id)
}

/// Log every admin user.
///
/// # Errors
///
/// Returns `AdminError::Database` if the users cannot be read.
pub async fn list_users(db: &Database) -> Result<(), AdminError> {
    let users = AdminUserRepository::new(db).list_all().await?;

    if users.is_empty() {
        tracing::info!("No admin users found");
        return Ok(());
    }

    for user in &users {
        tracing::info!(
            "{:>4}  {:<24} {:<12} {}",
            user.id,
            user.username,
            user.role.map_or("-", |role| role.as_str()),
            if user.is_active { "active" } else { "inactive" }
        );
    }
    tracing::info!("{} admin user(s)", users.len());

    Ok(())
}
