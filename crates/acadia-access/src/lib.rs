//! Pure access evaluation.
//!
//! Side-effect-free rules deciding read and write eligibility of a
//! user against a record. Each role has its own explicit arm; the
//! matches are exhaustive with no wildcard, so adding a `Role`
//! variant fails compilation until it is given a rule here. Role
//! ordering is never consulted: HOD and department staff share the
//! same scope in this engine and differ only in escalation paths
//! elsewhere.

use acadia_types::{Role, StudentRecord, User};

/// Whether `user` may view `record`.
///
/// Students see exactly their own record; department staff and HOD
/// see records of their own department; the Principal sees all.
pub fn can_access_record(user: &User, record: &StudentRecord) -> bool {
    match user.role {
        Role::Student => user.id == record.student_id,
        Role::DeptStaff => user.department == record.department,
        Role::Hod => user.department == record.department,
        Role::Principal => true,
    }
}

/// Whether `user` may modify `record`.
///
/// Students are always read-only, even for their own record; staff
/// rules match [`can_access_record`].
pub fn can_modify_record(user: &User, record: &StudentRecord) -> bool {
    match user.role {
        Role::Student => false,
        Role::DeptStaff => user.department == record.department,
        Role::Hod => user.department == record.department,
        Role::Principal => true,
    }
}
