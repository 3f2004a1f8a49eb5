//! Read-side repository for the `attendance` table.
//!
//! Creates and deletes go through [`crate::repositories::ledger::LedgerRepo`]
//! because every attendance mutation carries a point effect.

use grove_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::Attendance;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, date, created_at";

/// Provides read operations for attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// All attendance records, newest date first (teacher view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, Attendance>(&query).fetch_all(pool).await
    }

    /// One account's attendance records, oldest first (history projection).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attendance WHERE user_id = $1 ORDER BY date ASC");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
