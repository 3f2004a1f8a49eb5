//! Student profile entity model and DTOs.

use grove_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row from the `student_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentProfile {
    pub id: DbId,
    pub user_id: DbId,
    /// Cached point balance; mutated only by the ledger.
    pub talent_point: i32,
    pub class_name: String,
    pub theme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile joined with its owning account, as returned to clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentListing {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub display_name: String,
    pub talent_point: i32,
    pub class_name: String,
    pub theme: String,
}

/// DTO for the composite account + profile create.
///
/// The account and profile rows are written in one transaction.
#[derive(Debug)]
pub struct CreateStudent {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub class_name: String,
    pub theme: String,
}

/// DTO for partial updates of a student. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdateStudent {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
    pub class_name: Option<String>,
    pub theme: Option<String>,
}
