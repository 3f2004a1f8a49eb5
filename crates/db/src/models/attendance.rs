//! Attendance record entity model.

use chrono::NaiveDate;
use grove_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}
