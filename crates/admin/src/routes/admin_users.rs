//! Admin user lookup handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde::Serialize;
use tracing::instrument;

use school_admin_core::{AdminRole, AdminUserId};

use crate::{db::AdminUserRepository, error::AppError, models::AdminUser, state::AppState};

/// Stored credentials for one admin user.
///
/// Clients verify passwords against `password_hash` themselves.
#[derive(Serialize)]
pub struct PasswordHashView {
    pub id: AdminUserId,
    pub username: String,
    pub password_hash: String,
    pub role: Option<AdminRole>,
    pub is_active: bool,
}

impl From<AdminUser> for PasswordHashView {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Envelope for [`PasswordHashView`].
#[derive(Serialize)]
pub struct PasswordHashResponse {
    pub ok: bool,
    pub data: PasswordHashView,
}

/// Look up the stored password hash for a username.
///
/// GET /api/admin/users/{username}/hash
///
/// # Errors
///
/// Returns `AppError::NotFound` if no user has that username, including a
/// path segment that does not decode to UTF-8.
/// Returns `AppError::Database` if the lookup fails.
#[instrument(skip_all)]
pub async fn password_hash(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
) -> Result<Json<PasswordHashResponse>, AppError> {
    let Path(username) = username.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable username in path");
        user_not_found()
    })?;

    let user = AdminUserRepository::new(state.database())
        .get_by_username(&username)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::debug!(user_id = %user.id, "Served password hash");

    Ok(Json(PasswordHashResponse {
        ok: true,
        data: user.into(),
    }))
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_owned())
}
