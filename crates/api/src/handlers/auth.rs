//! Handlers for login and the caller's account summary.

use axum::extract::State;
use axum::Json;
use grove_core::error::CoreError;
use grove_core::roles::Role;
use grove_core::types::DbId;
use grove_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account summary: also the `GET /me` payload.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and receive an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Identical error for unknown user and bad password; never reveal which.
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let role = Role::parse(&user.role).ok_or_else(|| {
        AppError::InternalError(format!("Account {} has unknown role", user.id))
    })?;

    let access_token = generate_access_token(user.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role,
        },
    }))
}

/// GET /api/v1/me
///
/// The caller's own account summary.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserInfo>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role: auth.role,
    }))
}
