//! Pure domain logic for the Grove activity tracker.
//!
//! No I/O lives here: roles and the access-policy table, the activity-kind
//! vocabulary, ISO-week arithmetic for attendance deduplication, the
//! point-history projection, and the shared error taxonomy.

pub mod activity;
pub mod error;
pub mod history;
pub mod policy;
pub mod roles;
pub mod types;
pub mod week;
