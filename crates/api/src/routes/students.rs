//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /              -> ranking list (empty for unauthenticated)
/// POST   /              -> composite account + profile create (teacher)
/// GET    /me            -> caller's own profile with history
/// GET    /{id}          -> one profile with history (teacher)
/// PATCH  /{id}          -> partial update (teacher)
/// DELETE /{id}          -> delete account + cascade (teacher)
/// GET    /{id}/history  -> projected feed (teacher or owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(students::list_students).post(students::create_student),
        )
        .route("/me", get(students::my_profile))
        .route(
            "/{id}",
            get(students::get_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route("/{id}/history", get(students::student_history))
}
