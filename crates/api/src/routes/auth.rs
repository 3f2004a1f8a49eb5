//! Route definitions for login and the account summary.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /auth/login  -> login (public)
/// GET  /me          -> caller's account summary (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/me", get(auth::me))
}
