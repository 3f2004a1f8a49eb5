//! Activity record entity model and DTOs.

use grove_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub user_id: DbId,
    /// Raw kind text; parse with `grove_core::activity::ActivityKind::parse`.
    pub kind: String,
    pub content: String,
    pub points: i32,
    pub photo_url: Option<String>,
    pub is_approved: bool,
    pub created_at: Timestamp,
}

/// Activity joined with the owner's username, for list responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityWithOwner {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub kind: String,
    pub content: String,
    pub points: i32,
    pub photo_url: Option<String>,
    pub is_approved: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting an activity record.
///
/// Validated at the handler boundary: `kind` must be a member of the
/// closed vocabulary before it reaches the repository.
#[derive(Debug)]
pub struct CreateActivity {
    pub user_id: DbId,
    pub kind: String,
    pub content: String,
    pub points: i32,
    pub photo_url: Option<String>,
}
