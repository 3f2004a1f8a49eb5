pub mod activities;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /me                             caller's account summary
///
/// /students                       ranking list, composite create
/// /students/me                    own profile with history
/// /students/{id}                  get, update, delete (teacher)
/// /students/{id}/history          projected feed
///
/// /activities                     scoped list, create
/// /activities/{id}/approve        approve action (teacher)
/// /activities/{id}                delete with reversal
///
/// /attendance-records             list, create (teacher)
/// /attendance-records/{id}        delete with reversal (teacher)
/// /attendance/check-in            weekly check-in (teacher)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/students", students::router())
        .nest("/activities", activities::router())
        .merge(attendance::router())
}
