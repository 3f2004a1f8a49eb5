//! Route definitions for attendance records and the check-in action.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /attendance-records       -> list (teacher)
/// POST   /attendance-records       -> manual create (teacher)
/// DELETE /attendance-records/{id}  -> delete with reversal (teacher)
/// POST   /attendance/check-in      -> weekly check-in (teacher)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/attendance-records",
            get(attendance::list_attendance).post(attendance::create_attendance),
        )
        .route("/attendance-records/{id}", delete(attendance::delete_attendance))
        .route("/attendance/check-in", post(attendance::check_in))
}
