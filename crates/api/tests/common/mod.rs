#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use grove_api::auth::jwt::{generate_access_token, JwtConfig};
use grove_api::auth::password::hash_password;
use grove_api::config::ServerConfig;
use grove_api::router::build_app_router;
use grove_api::state::AppState;
use grove_core::roles::Role;
use grove_db::models::user::{CreateUser, User};
use grove_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Issue an access token the way the login handler would.
pub fn auth_token(user_id: i64, role: Role) -> String {
    generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a user directly in the database and return the row plus a valid
/// access token.
pub async fn create_user_with_token(pool: &PgPool, username: &str, role: Role) -> (User, String) {
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hash_password("test_password_123!").expect("hashing should succeed"),
        display_name: username.to_string(),
        role: role.as_str().to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    let token = auth_token(user.id, role);
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

pub async fn get(app: &Router, path: &str) -> Response {
    send(
        app,
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

pub async fn get_auth(app: &Router, path: &str, token: &str) -> Response {
    send(
        app,
        Request::builder()
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

pub async fn post_json(app: &Router, path: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
}

pub async fn post_json_auth(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
}

pub async fn patch_json_auth(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(
        app,
        Request::builder()
            .method("PATCH")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
}

pub async fn delete_auth(app: &Router, path: &str, token: &str) -> Response {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert status and return the parsed body in one step.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Read a student's cached balance straight from the database.
pub async fn balance(pool: &PgPool, user_id: i64) -> i32 {
    grove_db::repositories::StudentProfileRepo::find_by_user(pool, user_id)
        .await
        .expect("profile lookup should succeed")
        .map(|p| p.talent_point)
        .unwrap_or(0)
}
