//! Handlers for the `/activities` resource.
//!
//! Visibility is scoped by role; every point-affecting mutation goes
//! through the ledger so the record write and the balance delta share one
//! transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grove_core::activity::{ActivityKind, DEFAULT_ACTIVITY_POINTS};
use grove_core::error::CoreError;
use grove_core::policy::{self, RecordScope};
use grove_core::types::DbId;
use grove_db::models::activity::{Activity, ActivityWithOwner, CreateActivity};
use grove_db::repositories::{ActivityRepo, ApprovalOutcome, LedgerRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::StatusResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /activities`.
///
/// A student submits for themself (record starts unapproved). A teacher
/// may name a target `user_id`, in which case the record is created
/// pre-approved and its points apply immediately.
#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub kind: String,
    #[serde(default)]
    pub content: String,
    pub points: Option<i32>,
    pub photo_url: Option<String>,
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/activities
///
/// Teachers see every account's records; students see their own.
/// Unauthenticated callers get an empty list.
pub async fn list_activities(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActivityWithOwner>>> {
    let Some(auth) = auth else {
        return Ok(Json(Vec::new()));
    };

    let activities = match policy::activity_scope(auth.role, auth.user_id) {
        RecordScope::All => ActivityRepo::list_all(&state.pool).await?,
        RecordScope::Own(user_id) => ActivityRepo::list_for_user(&state.pool, user_id).await?,
    };
    Ok(Json(activities))
}

/// POST /api/v1/activities
pub async fn create_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    let kind = ActivityKind::parse(&input.kind).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown activity kind: {}",
            input.kind
        )))
    })?;

    let points = input.points.unwrap_or(DEFAULT_ACTIVITY_POINTS);
    if points < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Points must be at least 1".into(),
        )));
    }

    if let Some(target_id) = input.user_id {
        // Teacher-on-behalf create: pre-approved, points apply now.
        if !policy::can_create_for_target(auth.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only teachers can create activities for other students".into(),
            )));
        }
        UserRepo::find_by_id(&state.pool, target_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: target_id,
            }))?;

        let create = CreateActivity {
            user_id: target_id,
            kind: kind.as_str().to_string(),
            content: input.content,
            points,
            photo_url: input.photo_url,
        };
        let activity = LedgerRepo::create_approved(&state.pool, &create).await?;

        tracing::info!(
            teacher_id = auth.user_id,
            student_user_id = target_id,
            activity_id = activity.id,
            points = activity.points,
            "Activity created on behalf of student"
        );
        return Ok((StatusCode::CREATED, Json(activity)));
    }

    // Self-submission: starts unapproved, no point effect yet.
    let create = CreateActivity {
        user_id: auth.user_id,
        kind: kind.as_str().to_string(),
        content: input.content,
        points,
        photo_url: input.photo_url,
    };
    let activity = ActivityRepo::create_unapproved(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        activity_id = activity.id,
        kind = %kind,
        "Activity submitted"
    );
    Ok((StatusCode::CREATED, Json(activity)))
}

/// POST /api/v1/activities/{id}/approve
///
/// Flip the approval flag and grant points. Idempotent: a second approval
/// reports "already approved" and changes nothing. Teacher only.
pub async fn approve_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    if !policy::can_approve_activities(auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only teachers can approve activities".into(),
        )));
    }

    let outcome = LedgerRepo::approve(&state.pool, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    match outcome {
        ApprovalOutcome::Applied(activity) => {
            tracing::info!(
                teacher_id = auth.user_id,
                activity_id,
                student_user_id = activity.user_id,
                points = activity.points,
                "Activity approved"
            );
            Ok(Json(StatusResponse { status: "approved" }))
        }
        ApprovalOutcome::AlreadyApproved => Ok(Json(StatusResponse {
            status: "already approved",
        })),
    }
}

/// DELETE /api/v1/activities/{id}
///
/// Teachers may delete any record; students only their own. Deleting an
/// approved record reverses its points (clamped at zero).
pub async fn delete_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let activity = ActivityRepo::find_by_id(&state.pool, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    if !policy::can_delete_activity(auth.role, auth.user_id, activity.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only delete your own activities".into(),
        )));
    }

    LedgerRepo::delete_activity(&state.pool, activity_id).await?;

    tracing::info!(
        caller_id = auth.user_id,
        activity_id,
        was_approved = activity.is_approved,
        "Activity deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
