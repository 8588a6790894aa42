//! HTTP-level integration tests for registration, login, logout and the
//! session endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_auth, login_as, post_auth, post_json, TEST_PASSWORD,
};
use sqlx::PgPool;

fn register_body(username: &str, password: &str, confirm: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": password,
        "confirm_password": confirm,
    })
}

fn login_body(username: &str, password: &str, role: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": password, "role": role })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_creates_client_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body("new_client", "pass1234", "pass1234"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "new_client");
    assert_eq!(json["data"]["role"], "client");
    assert!(json["data"].get("password_hash").is_none());

    // The new account can log in as a client.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("new_client", "pass1234", "client"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_username_returns_409(pool: PgPool) {
    let body = register_body("dupe", "pass1234", "pass1234");

    let first = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/register",
        body.clone(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Username already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_password_mismatch_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body("mismatch", "pass1234", "pass4321"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Passwords do not match");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_short_password_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body("shorty", "abc", "abc"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must be at least 6 characters");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_empty_fields_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/register", register_body("  ", "", "")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please fill in all fields");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_overlong_username_returns_400(pool: PgPool) {
    let username = "u".repeat(51);
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body(&username, "pass1234", "pass1234"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Username must be at most 50 characters");

    // Exactly 50 characters fits `users.username VARCHAR(50)`.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body(&"u".repeat(50), "pass1234", "pass1234"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_padded_username_registers_and_logs_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body("alice ", "pass1234", "pass1234"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["username"], "alice");

    for username in ["alice ", "alice", "  alice"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/auth/login",
            login_body(username, "pass1234", "client"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {username:?}");
        let json = body_json(response).await;
        assert_eq!(json["data"]["session"]["username"], "alice");
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success_returns_token_and_session(pool: PgPool) {
    create_user(&pool, "agent", "support").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("agent", TEST_PASSWORD, "support"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["session"]["state"], "logged_in");
    assert_eq!(json["data"]["session"]["username"], "agent");
    assert_eq!(json["data"]["session"]["role"], "support");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_role_returns_401(pool: PgPool) {
    create_user(&pool, "someone", "client").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("someone", TEST_PASSWORD, "support"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    create_user(&pool, "someone", "client").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("someone", "not-the-password", "client"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_user_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("ghost", TEST_PASSWORD, "client"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_empty_fields_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/login", login_body("", "", "client")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please enter both username and password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_role_is_rejected(pool: PgPool) {
    create_user(&pool, "someone", "client").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("someone", TEST_PASSWORD, "admin"),
    )
    .await;

    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Session / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_without_token_is_logged_out(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/session").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "logged_out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_with_token_is_logged_in(pool: PgPool) {
    let token = login_as(&pool, "client_a", "client").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/session", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "logged_in");
    assert_eq!(json["data"]["username"], "client_a");
    assert_eq!(json["data"]["role"], "client");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_with_bad_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/session", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_returns_logged_out_session(pool: PgPool) {
    let token = login_as(&pool, "client_b", "client").await;
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "logged_out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
