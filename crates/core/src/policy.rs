//! Role-based access policy.
//!
//! The visibility and mutation rules live here as one table of small
//! functions so handlers never compare role strings ad hoc. Rules:
//!
//! | Action                           | Teacher | Student        |
//! |----------------------------------|---------|----------------|
//! | List student profiles (ranking)  | all     | all, read-only |
//! | List activity records            | all     | own only       |
//! | Create activity for self         | n/a     | yes, unapproved|
//! | Create activity for a target     | yes     | no             |
//! | Approve activity                 | yes     | no (403)       |
//! | Delete activity                  | any     | own only       |
//! | Attendance CRUD / check-in       | yes     | no (403)       |
//! | View a student's history feed    | any     | own only       |

use crate::roles::Role;
use crate::types::DbId;

/// Which activity records a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Every account's records.
    All,
    /// Only records owned by this account.
    Own(DbId),
}

/// Teachers see everything; students see their own records only.
pub fn activity_scope(role: Role, caller_id: DbId) -> RecordScope {
    match role {
        Role::Teacher => RecordScope::All,
        Role::Student => RecordScope::Own(caller_id),
    }
}

/// Only teachers may create, update, or delete student profiles.
pub fn can_manage_students(role: Role) -> bool {
    matches!(role, Role::Teacher)
}

/// Only teachers may flip the approval flag on an activity.
pub fn can_approve_activities(role: Role) -> bool {
    matches!(role, Role::Teacher)
}

/// Only teachers may create an activity on behalf of a named target.
pub fn can_create_for_target(role: Role) -> bool {
    matches!(role, Role::Teacher)
}

/// Teachers may delete any activity; students only their own.
pub fn can_delete_activity(role: Role, caller_id: DbId, owner_id: DbId) -> bool {
    match role {
        Role::Teacher => true,
        Role::Student => caller_id == owner_id,
    }
}

/// Attendance records are teacher territory (students see their own
/// attendance only through the history feed).
pub fn can_manage_attendance(role: Role) -> bool {
    matches!(role, Role::Teacher)
}

/// Teachers may view any student's history feed; students only their own.
pub fn can_view_history(role: Role, caller_id: DbId, subject_id: DbId) -> bool {
    match role {
        Role::Teacher => true,
        Role::Student => caller_id == subject_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_scope() {
        assert_eq!(activity_scope(Role::Teacher, 1), RecordScope::All);
        assert_eq!(activity_scope(Role::Student, 7), RecordScope::Own(7));
    }

    #[test]
    fn test_teacher_only_actions() {
        assert!(can_manage_students(Role::Teacher));
        assert!(!can_manage_students(Role::Student));
        assert!(can_approve_activities(Role::Teacher));
        assert!(!can_approve_activities(Role::Student));
        assert!(can_create_for_target(Role::Teacher));
        assert!(!can_create_for_target(Role::Student));
        assert!(can_manage_attendance(Role::Teacher));
        assert!(!can_manage_attendance(Role::Student));
    }

    #[test]
    fn test_delete_ownership() {
        assert!(can_delete_activity(Role::Teacher, 1, 2));
        assert!(can_delete_activity(Role::Student, 5, 5));
        assert!(!can_delete_activity(Role::Student, 5, 6));
    }

    #[test]
    fn test_history_visibility() {
        assert!(can_view_history(Role::Teacher, 1, 9));
        assert!(can_view_history(Role::Student, 9, 9));
        assert!(!can_view_history(Role::Student, 9, 1));
    }
}
