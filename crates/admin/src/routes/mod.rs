//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health                      - Health check (no database access)
//!
//! # Users
//! GET  /api/admin/users/{username}/hash - Stored password hash for a user
//!
//! # Sessions
//! POST /api/admin/login                 - Log in, issue a session
//! POST /api/admin/session               - Issue a session for a verified user
//! GET  /api/admin/session               - Validate a bearer token
//!
//! OPTIONS *                             - 204 preflight
//! anything else (HEAD included)         - 404 {"ok": false, "error": "Not found"}
//! ```

pub mod admin_users;
pub mod auth;
pub mod health;

use axum::{
    Router,
    http::{Request, Response},
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::with_cors;
use crate::state::AppState;

/// Build the route table.
///
/// `HEAD` is routed to the 404 handler explicitly; axum would otherwise
/// answer it from every `GET` handler.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health).head(not_found))
        .route(
            "/api/admin/users/{username}/hash",
            get(admin_users::password_hash).head(not_found),
        )
        .route("/api/admin/login", post(auth::login))
        .route(
            "/api/admin/session",
            post(auth::create_session)
                .get(auth::current_session)
                .head(not_found),
        )
}

/// Build the complete application: routes, fallbacks, CORS and tracing.
///
/// Sentry layers are added by the binary.
pub fn router(state: AppState) -> Router {
    let app = routes()
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state);

    with_cors(app).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    status = tracing::field::Empty,
                    latency_ms = tracing::field::Empty,
                )
            })
            .on_response(
                |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                },
            ),
    )
}

/// Unknown path, or known path with an unsupported method.
async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_owned())
}
