//! Integration tests for the School Admin API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p school-admin-integration-tests
//! ```
//!
//! Each test gets its own temporary `SQLite` file, migrated with the embedded
//! migrations and removed when the [`TestContext`] is dropped. Requests go
//! through the full router (fallbacks, CORS, tracing) via `oneshot`; the
//! `client_context` tests additionally bind a real socket.
//!
//! # Test Categories
//!
//! - `health` - Health check
//! - `password_hash` - Hash lookup
//! - `sessions` - Login, session creation and validation
//! - `transport` - CORS, preflight, fallbacks, body handling
//! - `client_context` - Recorded peer address and user agent

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use school_admin_api::config::AdminApiConfig;
use school_admin_api::db::{AdminUserRepository, Database};
use school_admin_api::models::{AdminUser, NewAdminUser};
use school_admin_api::{AppState, router};
use school_admin_core::{AdminRole, AdminUserId};

/// A temporary database plus the application built on top of it.
pub struct TestContext {
    pub db: Database,
    path: PathBuf,
}

impl Drop for TestContext {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// A response reduced to the parts the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Value::Null` for an empty body.
    pub body: Value,
}

impl TestContext {
    /// Create a migrated, empty database.
    pub async fn new() -> Self {
        let ctx = Self::without_database();
        ctx.db.migrate().await.unwrap();
        ctx
    }

    /// Point at a database file that does not exist.
    #[must_use]
    pub fn without_database() -> Self {
        let path = std::env::temp_dir().join(format!("school-admin-{}.db", uuid::Uuid::new_v4()));
        Self {
            db: Database::new(&path),
            path,
        }
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the application against this database.
    #[must_use]
    pub fn app(&self) -> Router {
        let config = AdminApiConfig {
            database_path: self.path.clone(),
            ..AdminApiConfig::default()
        };
        router(AppState::new(config))
    }

    /// Seed an admin user with role `admin`.
    pub async fn seed_user(&self, username: &str, is_active: bool) -> AdminUser {
        self.seed_user_with_role(username, AdminRole::Admin, is_active)
            .await
    }

    /// Seed an admin user with an explicit role.
    pub async fn seed_user_with_role(
        &self,
        username: &str,
        role: AdminRole,
        is_active: bool,
    ) -> AdminUser {
        AdminUserRepository::new(&self.db)
            .create(&NewAdminUser {
                username,
                password_hash: "$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy",
                full_name: Some("Test Admin"),
                role,
                is_active,
            })
            .await
            .unwrap()
    }

    /// Run raw SQL against the database (for rows the repositories cannot write).
    pub async fn execute(&self, sql: &str) {
        let mut conn = self.db.connect().await.unwrap();
        sqlx::query(sql).execute(&mut conn).await.unwrap();
    }

    /// Number of session rows for `user`.
    pub async fn session_count(&self, user: AdminUserId) -> i64 {
        let mut conn = self.db.connect().await.unwrap();
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_sessions WHERE admin_user_id = ?")
            .bind(user)
            .fetch_one(&mut conn)
            .await
            .unwrap()
    }

    /// Send one request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// `GET path` with a bearer token.
    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.send(
            Request::get(path)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// `POST path` with a raw body sent as JSON.
    pub async fn post(&self, path: &str, body: &str) -> TestResponse {
        self.send(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
    }

    /// Request `path` with an arbitrary method and no body.
    pub async fn request(&self, method: Method, path: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Serve the application on an ephemeral local port.
    ///
    /// The server task runs until the test's runtime shuts down.
    pub async fn serve(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.app();

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        addr
    }
}

/// Returns true for a 32-character lowercase hex token.
#[must_use]
pub fn is_hex_token(token: &str) -> bool {
    token.len() == 32
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
