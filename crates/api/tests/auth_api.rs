//! HTTP-level integration tests for login and the account summary.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user_with_token, expect_json, get, get_auth, post_json};
use grove_core::roles::Role;
use sqlx::PgPool;

/// Successful login returns the access token and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, _) = create_user_with_token(&pool, "teacher1", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "teacher1", "password": "test_password_123!" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "teacher1");
    assert_eq!(json["user"]["role"], "teacher");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_user_with_token(&pool, "wrongpw", Role::Student).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401 with the same message as
/// a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

/// The issued token works against GET /me.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_account_summary(pool: PgPool) {
    let (user, token) = create_user_with_token(&pool, "student1", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/me", &token).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["id"], user.id);
    assert_eq!(json["username"], "student1");
    assert_eq!(json["role"], "student");
}

/// GET /me without a credential is an authentication error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage bearer token is rejected, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
