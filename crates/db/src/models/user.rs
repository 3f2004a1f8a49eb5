//! User entity model and DTOs.

use grove_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// External output goes through the API layer's summary types, which omit
/// it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    /// Raw role text; parse with `grove_core::roles::Role::parse`.
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. `password_hash` is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
}
