//! Admin user domain types.
//!
//! These types represent validated domain objects for admin authentication.

use school_admin_core::{AdminRole, AdminUserId};

/// An admin user (domain type).
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Unique login name.
    pub username: String,
    /// Stored password hash (bcrypt). Verified by clients, never by the API.
    pub password_hash: String,
    /// Admin's role, if one is recorded.
    pub role: Option<AdminRole>,
    /// Whether the account may log in. A NULL column counts as active.
    pub is_active: bool,
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Fields for seeding a new admin user.
#[derive(Debug, Clone)]
pub struct NewAdminUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: Option<&'a str>,
    pub role: AdminRole,
    pub is_active: bool,
}
