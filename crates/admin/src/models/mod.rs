//! Domain models for the admin API.

pub mod admin_user;
pub mod session;

use chrono::{DateTime, SecondsFormat, Utc};

pub use admin_user::{AdminUser, NewAdminUser};
pub use session::{AdminSession, ClientContext, NewAdminSession};

/// Render a UTC instant as ISO-8601 with microseconds and a `Z` designator.
///
/// This is the wire and storage format for every timestamp the API emits,
/// e.g. `2026-10-16T08:15:30.123456Z`.
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
