//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Plain create / update DTOs built by the handlers after validation
//!   (update DTOs carry all-`Option` fields for partial patches)

pub mod activity;
pub mod attendance;
pub mod student_profile;
pub mod user;
