//! Export formats, types, and errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Serialization format for an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON array, 2-space indent.
    Json,
    /// Header row plus one data row per record.
    Csv,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Which reduced view of a record an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportType {
    /// Identity fields plus grades.
    Grades,
    /// Identity fields plus attendance.
    Attendance,
    /// Identity fields plus the whole data payload.
    Full,
}

impl ExportType {
    /// Parse a caller-supplied label; anything unrecognized means the
    /// full view.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Full)
    }

    /// Projected field names, in output (CSV column) order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Grades => &["student_id", "name", "department", "year", "semester", "grades"],
            Self::Attendance => &["student_id", "name", "department", "attendance"],
            Self::Full => &["student_id", "name", "department", "year", "semester", "data"],
        }
    }
}

/// Derive the default export filename:
/// `<department>_<export_type>_export_<YYYYmmdd_HHMMSS>.<ext>`.
pub fn derive_filename(
    department: &str,
    export_type: ExportType,
    format: ExportFormat,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_export_{}.{}",
        department,
        export_type,
        at.format("%Y%m%d_%H%M%S"),
        format.extension(),
    )
}

/// Export error.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O failure writing the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Malformed projection (e.g. non-object row).
    #[error("format error: {0}")]
    Format(String),
}

/// Export result.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_type_label_fallback() {
        assert_eq!(ExportType::from_label("grades"), ExportType::Grades);
        assert_eq!(ExportType::from_label("attendance"), ExportType::Attendance);
        assert_eq!(ExportType::from_label("full"), ExportType::Full);
        assert_eq!(ExportType::from_label("everything"), ExportType::Full);
    }

    #[test]
    fn test_filename_shape() {
        let at = Utc.with_ymd_and_hms(2026, 8, 30, 14, 5, 9).unwrap();
        let name = derive_filename("AIML", ExportType::Grades, ExportFormat::Csv, at);
        assert_eq!(name, "AIML_grades_export_20260830_140509.csv");
    }

    #[test]
    fn test_attendance_fields_exclude_grades() {
        let fields = ExportType::Attendance.fields();
        assert!(!fields.contains(&"grades"));
        assert!(!fields.contains(&"year"));
        assert!(fields.contains(&"attendance"));
    }
}
