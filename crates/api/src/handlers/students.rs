//! Handlers for the `/students` resource: composite account + profile
//! CRUD, the ranking view, and the point-history feed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grove_core::activity::ActivityKind;
use grove_core::error::CoreError;
use grove_core::history::{self, HistoryEntry};
use grove_core::policy;
use grove_core::types::DbId;
use grove_db::models::student_profile::{CreateStudent, StudentListing, UpdateStudent};
use grove_db::repositories::{ActivityRepo, AttendanceRepo, StudentProfileRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::middleware::rbac::RequireTeacher;
use crate::state::AppState;

/// Minimum length for explicitly supplied student passwords.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Password assigned when a teacher creates a student without one,
/// matching long-standing classroom practice.
const DEFAULT_STUDENT_PASSWORD: &str = "password123";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /students`.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub username: String,
    /// Defaults to [`DEFAULT_STUDENT_PASSWORD`] when omitted.
    pub password: Option<String>,
    pub name: String,
    #[serde(default)]
    pub class_name: String,
    pub theme: Option<String>,
}

/// Request body for `PATCH /students/{id}`. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub theme: Option<String>,
}

/// Single-profile payload: the listing plus the projected history feed.
#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    pub profile: StudentListing,
    pub point_history: Vec<HistoryEntry>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/students
///
/// Ranking view: every profile ordered by balance, visible to any
/// authenticated caller. Unauthenticated callers get an empty list.
pub async fn list_students(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StudentListing>>> {
    if auth.is_none() {
        return Ok(Json(Vec::new()));
    }
    let listings = StudentProfileRepo::list_ranked(&state.pool).await?;
    Ok(Json(listings))
}

/// POST /api/v1/students
///
/// Composite create: provisions the backing account (role student) and the
/// profile in one transaction. Teacher only.
pub async fn create_student(
    RequireTeacher(teacher): RequireTeacher,
    State(state): State<AppState>,
    Json(input): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<StudentListing>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }

    let password = match &input.password {
        Some(p) => {
            validate_password_strength(p, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            p.as_str()
        }
        None => DEFAULT_STUDENT_PASSWORD,
    };
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateStudent {
        username: input.username,
        password_hash,
        display_name: input.name,
        class_name: input.class_name,
        theme: input.theme.unwrap_or_else(|| "default".to_string()),
    };

    let listing = StudentProfileRepo::create_student(&state.pool, &create).await?;

    tracing::info!(
        teacher_id = teacher.user_id,
        student_user_id = listing.user_id,
        "Student account created"
    );

    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/v1/students/me
///
/// The caller's own profile with history. 404 if no profile exists yet
/// (profiles are provisioned lazily by the first point event).
pub async fn my_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<StudentDetailResponse>> {
    let listing = StudentProfileRepo::find_listing_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudentProfile",
            id: auth.user_id,
        }))?;

    let point_history = load_history(&state, listing.user_id).await?;
    Ok(Json(StudentDetailResponse {
        profile: listing,
        point_history,
    }))
}

/// GET /api/v1/students/{id}
///
/// One profile with history. Teacher only.
pub async fn get_student(
    RequireTeacher(_teacher): RequireTeacher,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<Json<StudentDetailResponse>> {
    let listing = StudentProfileRepo::find_listing(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudentProfile",
            id: profile_id,
        }))?;

    let point_history = load_history(&state, listing.user_id).await?;
    Ok(Json(StudentDetailResponse {
        profile: listing,
        point_history,
    }))
}

/// PATCH /api/v1/students/{id}
///
/// Partial update of account and profile fields. Teacher only.
pub async fn update_student(
    RequireTeacher(_teacher): RequireTeacher,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
    Json(input): Json<UpdateStudentRequest>,
) -> AppResult<Json<StudentListing>> {
    let password_hash = match &input.password {
        Some(p) => {
            validate_password_strength(p, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(p)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let update = UpdateStudent {
        username: input.username,
        display_name: input.name,
        password_hash,
        class_name: input.class_name,
        theme: input.theme,
    };

    let listing = StudentProfileRepo::update_student(&state.pool, profile_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudentProfile",
            id: profile_id,
        }))?;

    Ok(Json(listing))
}

/// DELETE /api/v1/students/{id}
///
/// Remove the student's account; profile, activities, and attendance
/// cascade with it. Teacher only.
pub async fn delete_student(
    RequireTeacher(teacher): RequireTeacher,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StudentProfileRepo::delete_student(&state.pool, profile_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StudentProfile",
            id: profile_id,
        }));
    }

    tracing::info!(
        teacher_id = teacher.user_id,
        profile_id,
        "Student account deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/students/{id}/history
///
/// The projected feed on its own. Teachers may view any student; a student
/// may view only their own.
pub async fn student_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let listing = StudentProfileRepo::find_listing(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudentProfile",
            id: profile_id,
        }))?;

    if !policy::can_view_history(auth.role, auth.user_id, listing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own history".into(),
        )));
    }

    let entries = load_history(&state, listing.user_id).await?;
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Gather approved activities and attendance for one account and project
/// them into the chronological feed. Read-only.
async fn load_history(state: &AppState, user_id: DbId) -> AppResult<Vec<HistoryEntry>> {
    let mut entries = Vec::new();

    for activity in ActivityRepo::list_approved_for_user(&state.pool, user_id).await? {
        // Rows predating a vocabulary change fall back to Other rather
        // than poisoning the whole feed.
        let kind = ActivityKind::parse(&activity.kind).unwrap_or(ActivityKind::Other);
        entries.push(history::activity_entry(
            activity.id,
            kind,
            &activity.content,
            activity.created_at,
        ));
    }

    for attendance in AttendanceRepo::list_for_user(&state.pool, user_id).await? {
        entries.push(history::attendance_entry(attendance.id, attendance.date));
    }

    Ok(history::merge(entries))
}
