//! Handlers for attendance records and the weekly check-in action.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use grove_core::error::CoreError;
use grove_core::policy;
use grove_core::roles::Role;
use grove_core::types::DbId;
use grove_db::models::attendance::Attendance;
use grove_db::repositories::{AttendanceRepo, CheckInOutcome, LedgerRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::middleware::rbac::RequireTeacher;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /attendance-records` (manual teacher entry).
#[derive(Debug, Deserialize)]
pub struct CreateAttendanceRequest {
    pub user_id: DbId,
    pub date: NaiveDate,
}

/// Request body for `POST /attendance/check-in`.
///
/// `student_id` is optional at the wire level so a missing id surfaces as
/// the documented 400, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub student_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/attendance-records
///
/// Teacher-only view (students see their own attendance through the
/// history feed). Unauthenticated callers get an empty list.
pub async fn list_attendance(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Attendance>>> {
    let Some(auth) = auth else {
        return Ok(Json(Vec::new()));
    };
    if !policy::can_manage_attendance(auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Teacher role required".into(),
        )));
    }

    let records = AttendanceRepo::list_all(&state.pool).await?;
    Ok(Json(records))
}

/// POST /api/v1/attendance-records
///
/// Manual entry for an arbitrary date; grants the fixed point. Teacher
/// only. A duplicate (student, date) pair is rejected with 409.
pub async fn create_attendance(
    RequireTeacher(teacher): RequireTeacher,
    State(state): State<AppState>,
    Json(input): Json<CreateAttendanceRequest>,
) -> AppResult<(StatusCode, Json<Attendance>)> {
    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    let attendance = LedgerRepo::create_attendance(&state.pool, input.user_id, input.date).await?;

    tracing::info!(
        teacher_id = teacher.user_id,
        student_user_id = input.user_id,
        date = %input.date,
        "Attendance record created"
    );
    Ok((StatusCode::CREATED, Json(attendance)))
}

/// DELETE /api/v1/attendance-records/{id}
///
/// Removes the record and reverses its point (clamped at zero). Teacher only.
pub async fn delete_attendance(
    RequireTeacher(teacher): RequireTeacher,
    State(state): State<AppState>,
    Path(attendance_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LedgerRepo::delete_attendance(&state.pool, attendance_id).await?;
    if deleted.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Attendance",
            id: attendance_id,
        }));
    }

    tracing::info!(teacher_id = teacher.user_id, attendance_id, "Attendance record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/attendance/check-in
///
/// Weekly check-in for a target student: at most one per Monday-to-Sunday
/// window, derived from the server's local date. Teacher only.
pub async fn check_in(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CheckInRequest>,
) -> AppResult<Json<MessageResponse>> {
    if auth.role != Role::Teacher {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only teachers can check attendance".into(),
        )));
    }

    let student_id = input.student_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Student ID required".into()))
    })?;

    let student = UserRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: student_id,
        }))?;

    let today = chrono::Local::now().date_naive();
    match LedgerRepo::check_in(&state.pool, student_id, today).await? {
        CheckInOutcome::CheckedIn(_) => {
            tracing::info!(
                teacher_id = auth.user_id,
                student_user_id = student_id,
                date = %today,
                "Weekly attendance checked"
            );
            Ok(Json(MessageResponse {
                message: format!("Attendance checked for {} (+1 Talent)", student.username),
            }))
        }
        CheckInOutcome::AlreadyCheckedIn => Err(AppError::Core(CoreError::Validation(
            "Already checked attendance this week".into(),
        ))),
    }
}
