//! Integration tests for login, session creation and session validation.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeDelta, Utc};

use school_admin_api::db::{AdminSessionRepository, RepositoryError};
use school_admin_api::models::NewAdminSession;
use school_admin_core::{AdminUserId, SessionToken};
use school_admin_integration_tests::{TestContext, is_hex_token};

fn expiry(body: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(body["expires_at"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_preview_admin_issues_session() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin", true).await;
    let before = Utc::now();

    let resp = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"admin","password":"admin123"}"#,
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["ok"], true);
    assert!(is_hex_token(resp.body["token"].as_str().unwrap()));
    assert_eq!(resp.body["user"]["id"], admin.id.as_i64());
    assert_eq!(resp.body["user"]["username"], "admin");
    assert_eq!(resp.body["user"]["role"], "admin");

    let expires_at = expiry(&resp.body);
    assert!(expires_at >= before + TimeDelta::hours(24) - TimeDelta::seconds(1));
    assert!(expires_at <= Utc::now() + TimeDelta::hours(24) + TimeDelta::seconds(1));

    assert_eq!(ctx.session_count(admin.id).await, 1);
}

#[tokio::test]
async fn test_login_trims_username() {
    let ctx = TestContext::new().await;
    ctx.seed_user("admin", true).await;

    let resp = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"  admin ","password":"admin123"}"#,
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin", true).await;

    let resp = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"admin","password":"hunter2"}"#,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["ok"], false);
    assert_eq!(
        resp.body["error"],
        "Server-side bcrypt not available in preview"
    );
    assert_eq!(ctx.session_count(admin.id).await, 0);
}

#[tokio::test]
async fn test_login_other_user_is_401_even_with_preview_password() {
    let ctx = TestContext::new().await;
    let teacher = ctx.seed_user("teacher", true).await;

    let resp = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"teacher","password":"admin123"}"#,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.body["error"],
        "Server-side bcrypt not available in preview"
    );
    assert_eq!(ctx.session_count(teacher.id).await, 0);
}

#[tokio::test]
async fn test_login_unknown_user_is_invalid_credentials() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"ghost","password":"admin123"}"#,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_inactive_admin_is_401() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin", false).await;

    let resp = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"admin","password":"admin123"}"#,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.session_count(admin.id).await, 0);
}

#[tokio::test]
async fn test_login_malformed_json_is_401() {
    let ctx = TestContext::new().await;
    ctx.seed_user("admin", true).await;

    let resp = ctx.post("/api/admin/login", "{username: admin").await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["ok"], false);
    assert_eq!(resp.body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_without_body_is_401() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .send(
            Request::post("/api/admin/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_oversized_body_counts_as_empty() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin", true).await;
    let padding = "x".repeat(3 * 1024 * 1024);
    let body = format!(r#"{{"username":"admin","password":"admin123","padding":"{padding}"}}"#);

    let resp = ctx.post("/api/admin/login", &body).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["ok"], false);
    assert_eq!(resp.body["error"], "Invalid credentials");
    assert_eq!(ctx.session_count(admin.id).await, 0);
}

#[tokio::test]
async fn test_create_session_oversized_body_counts_as_empty() {
    let ctx = TestContext::new().await;
    ctx.seed_user("teacher", true).await;
    let padding = "x".repeat(3 * 1024 * 1024);
    let body = format!(r#"{{"username":"teacher","padding":"{padding}"}}"#);

    let resp = ctx.post("/api/admin/session", &body).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "User not active or not found");
}

#[tokio::test]
async fn test_each_login_inserts_one_row() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin", true).await;
    let body = r#"{"username":"admin","password":"admin123"}"#;

    let first = ctx.post("/api/admin/login", body).await;
    let second = ctx.post("/api/admin/login", body).await;

    assert_ne!(first.body["token"], second.body["token"]);
    assert_eq!(ctx.session_count(admin.id).await, 2);
}

// ============================================================================
// Session creation
// ============================================================================

#[tokio::test]
async fn test_create_session_for_active_user() {
    let ctx = TestContext::new().await;
    ctx.seed_user("admin", true).await;
    let teacher = ctx.seed_user("teacher", true).await;

    let resp = ctx
        .post("/api/admin/session", r#"{"username":"teacher"}"#)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["ok"], true);
    assert!(is_hex_token(resp.body["token"].as_str().unwrap()));
    assert_eq!(resp.body["user"]["id"], teacher.id.as_i64());
    assert_eq!(resp.body["user"]["username"], "teacher");
    assert_eq!(ctx.session_count(teacher.id).await, 1);
}

#[tokio::test]
async fn test_create_session_inactive_user_is_401() {
    let ctx = TestContext::new().await;
    let retired = ctx.seed_user("retired", false).await;

    let resp = ctx
        .post("/api/admin/session", r#"{"username":"retired"}"#)
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "User not active or not found");
    assert_eq!(ctx.session_count(retired.id).await, 0);
}

#[tokio::test]
async fn test_create_session_unknown_user_is_401() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post("/api/admin/session", r#"{"username":"ghost"}"#)
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "User not active or not found");
}

#[tokio::test]
async fn test_create_session_null_is_active_counts_as_active() {
    let ctx = TestContext::new().await;
    ctx.execute(
        "INSERT INTO admin_users (username, password_hash, is_active) \
         VALUES ('legacy', '$2b$10$x', NULL)",
    )
    .await;

    let resp = ctx
        .post("/api/admin/session", r#"{"username":"legacy"}"#)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_session_storage_failure_is_500() {
    let ctx = TestContext::without_database();

    let resp = ctx
        .post("/api/admin/session", r#"{"username":"admin"}"#)
        .await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["ok"], false);
}

// ============================================================================
// Session validation
// ============================================================================

#[tokio::test]
async fn test_issued_token_validates() {
    let ctx = TestContext::new().await;
    ctx.seed_user("admin", true).await;
    let login = ctx
        .post(
            "/api/admin/login",
            r#"{"username":"admin","password":"admin123"}"#,
        )
        .await;
    let token = login.body["token"].as_str().unwrap();

    let resp = ctx.get_with_token("/api/admin/session", token).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["ok"], true);
    assert_eq!(resp.body["user"]["username"], "admin");
    assert_eq!(expiry(&resp.body), expiry(&login.body));
}

#[tokio::test]
async fn test_session_header_is_accepted() {
    let ctx = TestContext::new().await;
    ctx.seed_user("teacher", true).await;
    let created = ctx
        .post("/api/admin/session", r#"{"username":"teacher"}"#)
        .await;
    let token = created.body["token"].as_str().unwrap();

    let resp = ctx
        .send(
            Request::get("/api/admin/session")
                .header("X-Session-Token", token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/api/admin/session").await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "No session token provided");
}

#[tokio::test]
async fn test_unknown_token_is_401() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .get_with_token("/api/admin/session", &SessionToken::generate().into_inner())
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "Invalid session");
}

#[tokio::test]
async fn test_expired_session_is_401_and_kept() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin", true).await;
    let token = SessionToken::generate();
    AdminSessionRepository::new(&ctx.db)
        .insert(&NewAdminSession {
            admin_user_id: admin.id,
            token: &token,
            expires_at: "2020-01-01T00:00:00.000000Z",
            ip_address: None,
            user_agent: "",
        })
        .await
        .unwrap();

    let resp = ctx
        .get_with_token("/api/admin/session", token.as_str())
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "Session expired");
    assert_eq!(ctx.session_count(admin.id).await, 1);
}

#[tokio::test]
async fn test_session_for_missing_user_is_not_stored() {
    let ctx = TestContext::new().await;
    let token = SessionToken::generate();

    let result = AdminSessionRepository::new(&ctx.db)
        .insert(&NewAdminSession {
            admin_user_id: AdminUserId::new(999),
            token: &token,
            expires_at: "2030-01-01T00:00:00.000000Z",
            ip_address: Some("127.0.0.1"),
            user_agent: "",
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    assert_eq!(ctx.session_count(AdminUserId::new(999)).await, 0);

    let resp = ctx
        .get_with_token("/api/admin/session", token.as_str())
        .await;
    assert_eq!(resp.body["error"], "Invalid session");
}

#[tokio::test]
async fn test_session_of_deactivated_user_is_invalid() {
    let ctx = TestContext::new().await;
    ctx.seed_user("teacher", true).await;
    let created = ctx
        .post("/api/admin/session", r#"{"username":"teacher"}"#)
        .await;
    let token = created.body["token"].as_str().unwrap().to_owned();

    ctx.execute("UPDATE admin_users SET is_active = 0 WHERE username = 'teacher'")
        .await;
    let resp = ctx.get_with_token("/api/admin/session", &token).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "Invalid session");
}
