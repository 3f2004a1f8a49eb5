//! Read-side repository for the `activities` table.
//!
//! All point-affecting mutations (create-approved, approve, delete) live in
//! [`crate::repositories::ledger::LedgerRepo`] so the record write and the
//! balance delta share one transaction. This repository covers plain reads
//! and the unapproved student self-submission, which has no point effect.

use grove_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, ActivityWithOwner, CreateActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, kind, content, points, photo_url, is_approved, created_at";

/// Activity joined with the owner's username.
const OWNER_SELECT: &str = "SELECT a.id, a.user_id, u.username, a.kind, a.content,
            a.points, a.photo_url, a.is_approved, a.created_at
     FROM activities a
     JOIN users u ON u.id = a.user_id";

/// Provides read and unapproved-create operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a student self-submission. Always unapproved; no point effect.
    pub async fn create_unapproved(
        pool: &PgPool,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (user_id, kind, content, points, photo_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.user_id)
            .bind(&input.kind)
            .bind(&input.content)
            .bind(input.points)
            .bind(&input.photo_url)
            .fetch_one(pool)
            .await
    }

    /// Find an activity by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All activities across all accounts, newest first (teacher view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ActivityWithOwner>, sqlx::Error> {
        let query = format!("{OWNER_SELECT} ORDER BY a.created_at DESC");
        sqlx::query_as::<_, ActivityWithOwner>(&query)
            .fetch_all(pool)
            .await
    }

    /// One account's activities, newest first (student view).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ActivityWithOwner>, sqlx::Error> {
        let query = format!("{OWNER_SELECT} WHERE a.user_id = $1 ORDER BY a.created_at DESC");
        sqlx::query_as::<_, ActivityWithOwner>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// One account's approved activities, for the history projection.
    pub async fn list_approved_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE user_id = $1 AND is_approved = TRUE
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
