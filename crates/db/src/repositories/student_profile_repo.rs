//! Repository for the `student_profiles` table and the composite
//! account + profile writes behind the `/students` resource.

use grove_core::roles::Role;
use grove_core::types::DbId;
use sqlx::PgPool;

use crate::models::student_profile::{
    CreateStudent, StudentListing, StudentProfile, UpdateStudent,
};

/// Raw profile column list.
const COLUMNS: &str =
    "id, user_id, talent_point, class_name, theme, created_at, updated_at";

/// Profile joined with its owning account.
const LISTING_SELECT: &str = "SELECT p.id, p.user_id, u.username, u.display_name,
            p.talent_point, p.class_name, p.theme
     FROM student_profiles p
     JOIN users u ON u.id = p.user_id";

/// Provides CRUD operations for student profiles.
pub struct StudentProfileRepo;

impl StudentProfileRepo {
    /// Find a raw profile row by its owning account.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<StudentProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM student_profiles WHERE user_id = $1");
        sqlx::query_as::<_, StudentProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Ranking view: all profiles joined with their account, highest
    /// balance first (username as a stable tiebreak).
    pub async fn list_ranked(pool: &PgPool) -> Result<Vec<StudentListing>, sqlx::Error> {
        let query = format!("{LISTING_SELECT} ORDER BY p.talent_point DESC, u.username ASC");
        sqlx::query_as::<_, StudentListing>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a joined listing by profile ID.
    pub async fn find_listing(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Option<StudentListing>, sqlx::Error> {
        let query = format!("{LISTING_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, StudentListing>(&query)
            .bind(profile_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a joined listing by owning account ID.
    pub async fn find_listing_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<StudentListing>, sqlx::Error> {
        let query = format!("{LISTING_SELECT} WHERE p.user_id = $1");
        sqlx::query_as::<_, StudentListing>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Composite create: provision the backing student account and its
    /// profile as a single transaction.
    pub async fn create_student(
        pool: &PgPool,
        input: &CreateStudent,
    ) -> Result<StudentListing, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: DbId = sqlx::query_scalar(
            "INSERT INTO users (username, password_hash, display_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&input.display_name)
        .bind(Role::Student.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO student_profiles (user_id, class_name, theme)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, StudentProfile>(&query)
            .bind(user_id)
            .bind(&input.class_name)
            .bind(&input.theme)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(StudentListing {
            id: profile.id,
            user_id,
            username: input.username.clone(),
            display_name: input.display_name.clone(),
            talent_point: profile.talent_point,
            class_name: profile.class_name,
            theme: profile.theme,
        })
    }

    /// Partial update across both the account and profile rows in one
    /// transaction. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no profile with the given `id` exists.
    pub async fn update_student(
        pool: &PgPool,
        profile_id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<StudentListing>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<DbId> =
            sqlx::query_scalar("SELECT user_id FROM student_profiles WHERE id = $1 FOR UPDATE")
                .bind(profile_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE users SET
                username = COALESCE($2, username),
                display_name = COALESCE($3, display_name),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(&input.username)
        .bind(&input.display_name)
        .bind(&input.password_hash)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE student_profiles SET
                class_name = COALESCE($2, class_name),
                theme = COALESCE($3, theme),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(profile_id)
        .bind(&input.class_name)
        .bind(&input.theme)
        .execute(&mut *tx)
        .await?;

        let query = format!("{LISTING_SELECT} WHERE p.id = $1");
        let listing = sqlx::query_as::<_, StudentListing>(&query)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(listing))
    }

    /// Delete a student by profile ID. Removes the backing account; the
    /// profile, activities, and attendance rows cascade with it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_student(pool: &PgPool, profile_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM users
             WHERE id = (SELECT user_id FROM student_profiles WHERE id = $1)",
        )
        .bind(profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
