//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`LedgerRepo`] is the only
//! place that mutates `student_profiles.talent_point`.

pub mod activity_repo;
pub mod attendance_repo;
pub mod ledger;
pub mod student_profile_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use attendance_repo::AttendanceRepo;
pub use ledger::{ApprovalOutcome, CheckInOutcome, LedgerRepo};
pub use student_profile_repo::StudentProfileRepo;
pub use user_repo::UserRepo;
