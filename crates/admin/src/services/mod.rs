//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Session issuance and validation (no server-side password checks)

pub mod auth;

pub use auth::{AdminAuthError, AdminAuthService, IssuedSession};
