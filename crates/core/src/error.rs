use crate::types::DbId;

/// Domain-level error taxonomy shared by all crates.
///
/// The API layer maps each variant onto an HTTP status: `NotFound` -> 404,
/// `Validation` -> 400, `Conflict` -> 409, `Unauthorized` -> 401,
/// `Forbidden` -> 403, `Internal` -> 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
