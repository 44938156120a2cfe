//! Per-export-type record projections.

use crate::export::ExportType;
use acadia_types::StudentRecord;
use serde_json::{json, Value};

/// Project a record into the reduced view for `export_type`.
///
/// The returned object contains exactly the fields listed by
/// [`ExportType::fields`], never more: a grades export carries no
/// attendance data and vice versa.
pub fn project(record: &StudentRecord, export_type: ExportType) -> Value {
    match export_type {
        ExportType::Grades => json!({
            "student_id": record.student_id,
            "name": record.name,
            "department": record.department,
            "year": record.year,
            "semester": record.semester,
            "grades": record.data.grades,
        }),
        ExportType::Attendance => json!({
            "student_id": record.student_id,
            "name": record.name,
            "department": record.department,
            "attendance": record.data.attendance,
        }),
        ExportType::Full => json!({
            "student_id": record.student_id,
            "name": record.name,
            "department": record.department,
            "year": record.year,
            "semester": record.semester,
            "data": record.data,
        }),
    }
}
