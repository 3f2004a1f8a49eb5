//! The point ledger.
//!
//! Every operation here pairs a record mutation with its point effect in a
//! single transaction: if the record write fails the balance change rolls
//! back, and vice versa. Balance updates are single atomic `UPDATE`
//! statements, so concurrent operations on the same student serialize on
//! the profile row lock. Reversals clamp at zero with `GREATEST` -- the
//! balance can never go negative, and over-reversal is a silent clamp
//! rather than an error.

use chrono::NaiveDate;
use grove_core::types::DbId;
use grove_core::week::week_bounds;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::activity::{Activity, CreateActivity};
use crate::models::attendance::Attendance;

/// Fixed point value of one attendance record.
pub const ATTENDANCE_POINTS: i32 = 1;

/// Activity column list shared across ledger queries.
const ACTIVITY_COLUMNS: &str =
    "id, user_id, kind, content, points, photo_url, is_approved, created_at";

/// Attendance column list shared across ledger queries.
const ATTENDANCE_COLUMNS: &str = "id, user_id, date, created_at";

/// Result of an approval attempt.
#[derive(Debug)]
pub enum ApprovalOutcome {
    /// The flag was flipped and points were granted.
    Applied(Activity),
    /// The record was already approved; nothing changed.
    AlreadyApproved,
}

/// Result of a weekly check-in attempt.
#[derive(Debug)]
pub enum CheckInOutcome {
    /// A record was created for today and one point granted.
    CheckedIn(Attendance),
    /// A record already exists in the current Monday-to-Sunday window;
    /// nothing changed.
    AlreadyCheckedIn,
}

/// All mutations that touch `student_profiles.talent_point`.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Get-or-create the student's profile row inside the transaction.
    ///
    /// Explicit precondition before every point mutation: profiles are
    /// provisioned lazily on the first point-affecting event.
    async fn ensure_profile(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO student_profiles (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Atomically add `delta` points to the student's balance.
    async fn add_points(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE student_profiles
             SET talent_point = talent_point + $2, updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(delta)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Atomically subtract `delta` points, clamped at zero.
    async fn subtract_points_clamped(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE student_profiles
             SET talent_point = GREATEST(talent_point - $2, 0), updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(delta)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Approve an activity, granting its points to the owner.
    ///
    /// Idempotent, not additive: approving an already-approved record is a
    /// reported no-op. Returns `None` if the activity does not exist.
    pub async fn approve(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Option<ApprovalOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1 FOR UPDATE");
        let Some(activity) = sqlx::query_as::<_, Activity>(&query)
            .bind(activity_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if activity.is_approved {
            return Ok(Some(ApprovalOutcome::AlreadyApproved));
        }

        let query = format!(
            "UPDATE activities SET is_approved = TRUE WHERE id = $1
             RETURNING {ACTIVITY_COLUMNS}"
        );
        let approved = sqlx::query_as::<_, Activity>(&query)
            .bind(activity_id)
            .fetch_one(&mut *tx)
            .await?;

        Self::ensure_profile(&mut tx, approved.user_id).await?;
        Self::add_points(&mut tx, approved.user_id, approved.points).await?;

        tx.commit().await?;
        Ok(Some(ApprovalOutcome::Applied(approved)))
    }

    /// Teacher-on-behalf create: insert the record pre-approved and apply
    /// its points immediately, in the same transaction.
    pub async fn create_approved(
        pool: &PgPool,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO activities (user_id, kind, content, points, photo_url, is_approved)
             VALUES ($1, $2, $3, $4, $5, TRUE)
             RETURNING {ACTIVITY_COLUMNS}"
        );
        let activity = sqlx::query_as::<_, Activity>(&query)
            .bind(input.user_id)
            .bind(&input.kind)
            .bind(&input.content)
            .bind(input.points)
            .bind(&input.photo_url)
            .fetch_one(&mut *tx)
            .await?;

        Self::ensure_profile(&mut tx, activity.user_id).await?;
        Self::add_points(&mut tx, activity.user_id, activity.points).await?;

        tx.commit().await?;
        Ok(activity)
    }

    /// Delete an activity, reversing its point effect if it was approved.
    ///
    /// Deleting an unapproved record causes no balance change. Returns the
    /// deleted row, or `None` if it did not exist.
    pub async fn delete_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("DELETE FROM activities WHERE id = $1 RETURNING {ACTIVITY_COLUMNS}");
        let Some(activity) = sqlx::query_as::<_, Activity>(&query)
            .bind(activity_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if activity.is_approved {
            Self::ensure_profile(&mut tx, activity.user_id).await?;
            Self::subtract_points_clamped(&mut tx, activity.user_id, activity.points).await?;
        }

        tx.commit().await?;
        Ok(Some(activity))
    }

    /// Manually create an attendance record, granting the fixed point.
    ///
    /// A duplicate (user, date) pair surfaces as the unique-constraint
    /// violation on `uq_attendance_user_date`.
    pub async fn create_attendance(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Attendance, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO attendance (user_id, date)
             VALUES ($1, $2)
             RETURNING {ATTENDANCE_COLUMNS}"
        );
        let attendance = sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_one(&mut *tx)
            .await?;

        Self::ensure_profile(&mut tx, user_id).await?;
        Self::add_points(&mut tx, user_id, ATTENDANCE_POINTS).await?;

        tx.commit().await?;
        Ok(attendance)
    }

    /// Delete an attendance record, reversing its point (clamped at zero).
    pub async fn delete_attendance(
        pool: &PgPool,
        attendance_id: DbId,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("DELETE FROM attendance WHERE id = $1 RETURNING {ATTENDANCE_COLUMNS}");
        let Some(attendance) = sqlx::query_as::<_, Attendance>(&query)
            .bind(attendance_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        Self::ensure_profile(&mut tx, attendance.user_id).await?;
        Self::subtract_points_clamped(&mut tx, attendance.user_id, ATTENDANCE_POINTS).await?;

        tx.commit().await?;
        Ok(Some(attendance))
    }

    /// Weekly check-in: reject if any record exists in the Monday-to-Sunday
    /// window containing `today`, otherwise create today's record and grant
    /// the point.
    ///
    /// The profile row is locked first so two concurrent check-ins for the
    /// same student cannot both pass the weekly guard.
    pub async fn check_in(
        pool: &PgPool,
        user_id: DbId,
        today: NaiveDate,
    ) -> Result<CheckInOutcome, sqlx::Error> {
        let (monday, sunday) = week_bounds(today);
        let mut tx = pool.begin().await?;

        Self::ensure_profile(&mut tx, user_id).await?;
        sqlx::query("SELECT id FROM student_profiles WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let already: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM attendance
                WHERE user_id = $1 AND date BETWEEN $2 AND $3
             )",
        )
        .bind(user_id)
        .bind(monday)
        .bind(sunday)
        .fetch_one(&mut *tx)
        .await?;

        if already {
            return Ok(CheckInOutcome::AlreadyCheckedIn);
        }

        let query = format!(
            "INSERT INTO attendance (user_id, date)
             VALUES ($1, $2)
             RETURNING {ATTENDANCE_COLUMNS}"
        );
        let attendance = sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(today)
            .fetch_one(&mut *tx)
            .await?;

        Self::add_points(&mut tx, user_id, ATTENDANCE_POINTS).await?;

        tx.commit().await?;
        Ok(CheckInOutcome::CheckedIn(attendance))
    }
}
