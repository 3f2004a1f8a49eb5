//! Route definitions for the `/activities` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET    /              -> scoped list (all / own / empty)
/// POST   /              -> self-submission or teacher-on-behalf create
/// POST   /{id}/approve  -> approve (teacher, idempotent)
/// DELETE /{id}          -> delete with point reversal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route("/{id}/approve", post(activities::approve_activity))
        .route("/{id}", delete(activities::delete_activity))
}
