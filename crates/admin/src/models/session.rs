//! Session-related types for admin authentication.

use chrono::{DateTime, Utc};

use school_admin_core::{AdminSessionId, AdminUserId, SessionToken};

/// A persisted admin session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Database ID of this session.
    pub id: AdminSessionId,
    /// Admin user the session belongs to.
    pub admin_user_id: AdminUserId,
    /// Bearer token presented by clients.
    pub token: SessionToken,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
    /// Client address recorded at issuance.
    pub ip_address: Option<String>,
    /// Client `User-Agent` recorded at issuance.
    pub user_agent: Option<String>,
    /// When the row was written (set by the database).
    pub created_at: Option<DateTime<Utc>>,
}

impl AdminSession {
    /// Returns true if the session has expired as of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Who is asking for a session, as seen by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    /// Peer IP address, when the server knows it.
    pub ip_address: Option<String>,
    /// `User-Agent` header, empty when absent.
    pub user_agent: String,
}

/// Fields for inserting a new session row.
#[derive(Debug, Clone)]
pub struct NewAdminSession<'a> {
    pub admin_user_id: AdminUserId,
    pub token: &'a SessionToken,
    /// Expiry, already rendered in the storage format.
    pub expires_at: &'a str,
    pub ip_address: Option<&'a str>,
    pub user_agent: &'a str,
}
