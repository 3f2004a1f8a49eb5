//! Role-gating extractor.
//!
//! Wraps [`AuthUser`] and rejects requests whose role does not meet the
//! requirement. Finer-grained rules (ownership, visibility
//! scoping) live in `grove_core::policy` and are applied inside handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use grove_core::error::CoreError;
use grove_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `teacher` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn teacher_only(RequireTeacher(user): RequireTeacher) -> AppResult<Json<()>> {
///     // user is guaranteed to be a teacher here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireTeacher(pub AuthUser);

impl FromRequestParts<AppState> for RequireTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Teacher {
            return Err(AppError::Core(CoreError::Forbidden(
                "Teacher role required".into(),
            )));
        }
        Ok(RequireTeacher(user))
    }
}
