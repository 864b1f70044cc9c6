//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS response headers
//! 4. Preflight (`OPTIONS` short-circuit)
//!
//! Extractors used by handlers:
//!
//! - [`auth::BearerToken`] - session token from `Authorization` / `X-Session-Token`
//! - [`crate::models::ClientContext`] - peer IP and `User-Agent` (see [`client`])

pub mod auth;
pub mod client;
pub mod cors;

pub use auth::BearerToken;
pub use cors::with_cors;
