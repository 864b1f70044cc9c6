//! Health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use crate::models::iso_timestamp;
use crate::state::AppState;

/// Name reported in the `service` field.
pub const SERVICE_NAME: &str = "admin-api";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    /// File name of the configured database (not the full path).
    pub db_path: String,
    pub timestamp: String,
}

/// Liveness check.
///
/// GET /api/health
///
/// Never touches the database, so it answers even when the file is missing.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
        db_path: state.database().file_name(),
        timestamp: iso_timestamp(Utc::now()),
    })
}
