//! Student records, version history, and creation drafts.

use crate::Operation;
use acadia_common_core::{Error, RecordId, Result, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// The structured payload of a record: exactly two named sub-maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordData {
    /// Subject name to score.
    pub grades: BTreeMap<String, Value>,
    /// Date/period key to status.
    pub attendance: BTreeMap<String, Value>,
}

impl RecordData {
    /// Empty data with both sub-maps initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both sub-maps are empty.
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty() && self.attendance.is_empty()
    }
}

/// Which sub-map a modification targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModificationKind {
    /// `data.grades`.
    Grades,
    /// `data.attendance`.
    Attendance,
}

impl ModificationKind {
    /// The audit operation recorded for a successful modification of
    /// this kind.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Grades => Operation::GradeEntry,
            Self::Attendance => Operation::AttendanceEntry,
        }
    }
}

/// A captured prior state of a record's data.
///
/// Pushed onto `version_history` before each mutation; the history is
/// append-only, chronological, and never truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    /// The record's data before the mutation.
    pub data: RecordData,
    /// Who made the previous modification, if any.
    pub modified_by: Option<UserId>,
    /// When the captured state came into being (previous
    /// modification time, or creation time for the first snapshot).
    pub timestamp: DateTime<Utc>,
}

/// A single student's academic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique record identifier, immutable after creation.
    pub id: RecordId,
    /// The student this record belongs to.
    pub student_id: UserId,
    /// Student name.
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Year of study.
    pub year: u16,
    /// Current semester.
    pub semester: u8,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time; set together with `modified_by`.
    pub modified_at: Option<DateTime<Utc>>,
    /// Last modifying user; set together with `modified_at`.
    pub modified_by: Option<UserId>,
    /// Grades and attendance.
    pub data: RecordData,
    /// Pre-mutation snapshots, oldest first.
    pub version_history: Vec<VersionSnapshot>,
}

impl StudentRecord {
    /// Create a fresh record from validated creation fields.
    pub fn create(id: RecordId, fields: RecordFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id: fields.student_id,
            name: fields.name,
            department: fields.department,
            year: fields.year,
            semester: fields.semester,
            created_at,
            modified_at: None,
            modified_by: None,
            data: RecordData::new(),
            version_history: Vec::new(),
        }
    }

    /// Capture the current state as a version snapshot.
    ///
    /// The snapshot's timestamp is the previous modification time, or
    /// the creation time if the record has never been modified.
    pub fn snapshot(&self) -> VersionSnapshot {
        VersionSnapshot {
            data: self.data.clone(),
            modified_by: self.modified_by,
            timestamp: self.modified_at.unwrap_or(self.created_at),
        }
    }

    /// Snapshot, then merge `modifications` into the targeted sub-map.
    ///
    /// The merge is a key-wise upsert: existing keys are overwritten,
    /// new keys added, untouched keys preserved. `modified_at` and
    /// `modified_by` are set together. Callers perform permission and
    /// type validation first; once this runs, the whole mutation is
    /// applied.
    pub fn apply_modifications(
        &mut self,
        kind: ModificationKind,
        modifications: &BTreeMap<String, Value>,
        by: UserId,
        at: DateTime<Utc>,
    ) {
        self.version_history.push(self.snapshot());

        let target = match kind {
            ModificationKind::Grades => &mut self.data.grades,
            ModificationKind::Attendance => &mut self.data.attendance,
        };
        for (key, value) in modifications {
            target.insert(key.clone(), value.clone());
        }

        self.modified_at = Some(at);
        self.modified_by = Some(by);
    }
}

/// Caller-supplied fields for record creation, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    /// The student the record belongs to.
    pub student_id: Option<UserId>,
    /// Student name.
    pub name: Option<String>,
    /// Owning department.
    pub department: Option<String>,
    /// Year of study.
    pub year: Option<u16>,
    /// Current semester.
    pub semester: Option<u8>,
}

impl RecordDraft {
    /// Start an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the student id.
    pub fn student_id(mut self, id: UserId) -> Self {
        self.student_id = Some(id);
        self
    }

    /// Set the student name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the department.
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set the year of study.
    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the semester.
    pub fn semester(mut self, semester: u8) -> Self {
        self.semester = Some(semester);
        self
    }

    /// Validate that every required field is present and non-empty.
    pub fn validate(self) -> Result<RecordFields> {
        let student_id = self.student_id.ok_or_else(|| Error::missing_field("student_id"))?;
        let name = require_text(self.name, "name")?;
        let department = require_text(self.department, "department")?;
        let year = self.year.ok_or_else(|| Error::missing_field("year"))?;
        let semester = self.semester.ok_or_else(|| Error::missing_field("semester"))?;
        Ok(RecordFields {
            student_id,
            name,
            department,
            year,
            semester,
        })
    }
}

fn require_text(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(Error::missing_field(field)),
    }
}

/// Validated record-creation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// The student the record belongs to.
    pub student_id: UserId,
    /// Student name.
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Year of study.
    pub year: u16,
    /// Current semester.
    pub semester: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> StudentRecord {
        let fields = RecordDraft::new()
            .student_id(UserId::new(1))
            .name("Asha Rao")
            .department("AIML")
            .year(2)
            .semester(4)
            .validate()
            .unwrap();
        StudentRecord::create(RecordId::new(5), fields, Utc::now())
    }

    #[test]
    fn test_create_initializes_empty_state() {
        let record = sample_record();
        assert!(record.data.is_empty());
        assert!(record.version_history.is_empty());
        assert!(record.modified_at.is_none());
        assert!(record.modified_by.is_none());
    }

    #[test]
    fn test_draft_rejects_missing_fields() {
        let err = RecordDraft::new().name("x").validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field \"student_id\"");

        let err = RecordDraft::new()
            .student_id(UserId::new(1))
            .name("   ")
            .department("DS")
            .year(1)
            .semester(1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(f) if f == "name"));
    }

    #[test]
    fn test_first_snapshot_uses_creation_time() {
        let record = sample_record();
        let snap = record.snapshot();
        assert_eq!(snap.timestamp, record.created_at);
        assert!(snap.modified_by.is_none());
    }

    #[test]
    fn test_apply_modifications_snapshots_prior_state() {
        let mut record = sample_record();
        record
            .data
            .grades
            .extend([("Math".into(), json!(70)), ("Science".into(), json!(80))]);

        let mods = BTreeMap::from([("Math".to_string(), json!(90))]);
        let before = record.data.clone();
        record.apply_modifications(ModificationKind::Grades, &mods, UserId::new(2), Utc::now());

        assert_eq!(record.version_history.len(), 1);
        assert_eq!(record.version_history[0].data, before);
        assert_eq!(record.data.grades["Math"], json!(90));
        assert_eq!(record.data.grades["Science"], json!(80));
        assert_eq!(record.modified_by, Some(UserId::new(2)));
        assert!(record.modified_at.is_some());
    }

    #[test]
    fn test_second_snapshot_carries_previous_modifier() {
        let mut record = sample_record();
        let mods = BTreeMap::from([("Math".to_string(), json!(50))]);
        record.apply_modifications(ModificationKind::Grades, &mods, UserId::new(2), Utc::now());
        let first_modified_at = record.modified_at.unwrap();

        let mods = BTreeMap::from([("Math".to_string(), json!(60))]);
        record.apply_modifications(ModificationKind::Grades, &mods, UserId::new(3), Utc::now());

        assert_eq!(record.version_history.len(), 2);
        let second = &record.version_history[1];
        assert_eq!(second.modified_by, Some(UserId::new(2)));
        assert_eq!(second.timestamp, first_modified_at);
    }

    #[test]
    fn test_attendance_merge_leaves_grades_alone() {
        let mut record = sample_record();
        record.data.grades.insert("Math".into(), json!(75));

        let mods = BTreeMap::from([("2026-01-12".to_string(), json!("present"))]);
        record.apply_modifications(
            ModificationKind::Attendance,
            &mods,
            UserId::new(4),
            Utc::now(),
        );

        assert_eq!(record.data.grades["Math"], json!(75));
        assert_eq!(record.data.attendance["2026-01-12"], json!("present"));
    }

    #[test]
    fn test_modification_kind_parse() {
        assert_eq!(
            "grades".parse::<ModificationKind>().unwrap(),
            ModificationKind::Grades
        );
        assert_eq!(
            "attendance".parse::<ModificationKind>().unwrap(),
            ModificationKind::Attendance
        );
        assert!("fees".parse::<ModificationKind>().is_err());
    }

    #[test]
    fn test_modification_kind_operations() {
        assert_eq!(
            ModificationKind::Grades.operation(),
            Operation::GradeEntry
        );
        assert_eq!(
            ModificationKind::Attendance.operation(),
            Operation::AttendanceEntry
        );
    }

    mod merge_properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Upsert merge: every modified key takes the new value,
            /// every untouched key survives, and history grows by one.
            #[test]
            fn merge_is_keywise_upsert(
                existing in proptest::collection::btree_map("[a-z]{1,8}", 0u32..100, 0..8),
                incoming in proptest::collection::btree_map("[a-z]{1,8}", 0u32..100, 0..8),
            ) {
                let mut record = sample_record();
                record.data.grades = existing
                    .iter()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();

                let mods: BTreeMap<String, Value> = incoming
                    .iter()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();
                let history_before = record.version_history.len();
                record.apply_modifications(
                    ModificationKind::Grades,
                    &mods,
                    UserId::new(2),
                    Utc::now(),
                );

                prop_assert_eq!(record.version_history.len(), history_before + 1);
                for (k, v) in &incoming {
                    prop_assert_eq!(&record.data.grades[k], &json!(v));
                }
                for (k, v) in &existing {
                    if !incoming.contains_key(k) {
                        prop_assert_eq!(&record.data.grades[k], &json!(v));
                    }
                }
            }
        }
    }
}
