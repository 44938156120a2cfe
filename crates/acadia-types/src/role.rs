//! Institutional roles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The four institutional roles.
///
/// There is deliberately no total order here: permission breadth is
/// not a ladder (HOD and department staff share the same scope in
/// this engine), so every rule in the access evaluator names each
/// role explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// A student; may view their own record, never edit it.
    #[strum(serialize = "student", to_string = "Student")]
    Student,
    /// Teaching/administrative staff scoped to one department.
    #[strum(serialize = "dept_staff", to_string = "Dept Staff")]
    DeptStaff,
    /// Head of department; same record scope as department staff.
    #[strum(serialize = "hod", to_string = "HOD")]
    Hod,
    /// Principal; unconditional access.
    #[strum(serialize = "principal", to_string = "Principal")]
    Principal,
}

impl Role {
    /// Iterate over every role.
    pub fn all() -> impl Iterator<Item = Self> {
        use strum::IntoEnumIterator;
        Self::iter()
    }

    /// Roles allowed to enter grades or attendance.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::DeptStaff | Self::Hod | Self::Principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_labels() {
        assert_eq!(Role::Student.to_string(), "Student");
        assert_eq!(Role::DeptStaff.to_string(), "Dept Staff");
        assert_eq!(Role::Hod.to_string(), "HOD");
        assert_eq!(Role::Principal.to_string(), "Principal");
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&Role::DeptStaff).unwrap();
        assert_eq!(json, "\"dept_staff\"");
        let role: Role = serde_json::from_str("\"hod\"").unwrap();
        assert_eq!(role, Role::Hod);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("dept_staff".parse::<Role>().unwrap(), Role::DeptStaff);
        assert!("registrar".parse::<Role>().is_err());
    }

    #[test]
    fn test_staff_roles() {
        assert!(!Role::Student.is_staff());
        assert!(Role::DeptStaff.is_staff());
        assert!(Role::Hod.is_staff());
        assert!(Role::Principal.is_staff());
    }

    #[test]
    fn test_all_covers_four_roles() {
        assert_eq!(Role::all().count(), 4);
    }
}
