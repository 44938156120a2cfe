//! Audited operations.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Operations recorded in the audit trail.
///
/// The display form is the past-tense label used in formatted log
/// lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A record was read.
    #[strum(to_string = "Viewed")]
    View,
    /// A record was changed.
    #[strum(to_string = "Modified")]
    Modify,
    /// Records were exported to a file.
    #[strum(to_string = "Exported")]
    Export,
    /// A record was removed.
    #[strum(to_string = "Deleted")]
    Delete,
    /// Grades were entered.
    #[strum(to_string = "Entered Grades")]
    GradeEntry,
    /// Attendance was marked.
    #[strum(to_string = "Attendance marked")]
    AttendanceEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_past_tense_labels() {
        assert_eq!(Operation::View.to_string(), "Viewed");
        assert_eq!(Operation::Modify.to_string(), "Modified");
        assert_eq!(Operation::Export.to_string(), "Exported");
        assert_eq!(Operation::Delete.to_string(), "Deleted");
        assert_eq!(Operation::GradeEntry.to_string(), "Entered Grades");
        assert_eq!(Operation::AttendanceEntry.to_string(), "Attendance marked");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Operation::GradeEntry).unwrap();
        assert_eq!(json, "\"grade_entry\"");
    }
}
