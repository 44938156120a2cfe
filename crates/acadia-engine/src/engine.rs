//! The record engine: creation, versioned mutation, and export.

use crate::config::EngineConfig;
use crate::store::RecordStore;
use acadia_access::{can_access_record, can_modify_record};
use acadia_audit::{AuditLogger, UserLookup};
use acadia_common_core::{Error, RecordId, Result, UserId};
use acadia_export::{derive_filename, project, write_export, ExportFormat, ExportType};
use acadia_types::{ModificationKind, Operation, RecordDraft, StudentRecord};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Orchestrates record creation, versioned mutation, and export.
///
/// Every public operation takes the acting `user_id`, resolves the
/// user, consults the access evaluator, performs the effect (or not),
/// and records exactly one audit entry before returning. Failures are
/// handled locally: callers see a sentinel (`false`/`None`) and the
/// cause lands in the audit trail, never in a propagated error.
/// Record-creation validation is the one documented exception.
pub struct RecordEngine {
    users: Arc<dyn UserLookup>,
    records: Arc<dyn RecordStore>,
    audit: AuditLogger,
    config: EngineConfig,
    // Serializes the snapshot-then-merge sequence so concurrent
    // modifications cannot interleave a snapshot with a merge.
    mutation: Mutex<()>,
}

impl RecordEngine {
    /// Create an engine with the default configuration.
    pub fn new(
        users: Arc<dyn UserLookup>,
        records: Arc<dyn RecordStore>,
        audit: AuditLogger,
    ) -> Self {
        Self::with_config(users, records, audit, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(
        users: Arc<dyn UserLookup>,
        records: Arc<dyn RecordStore>,
        audit: AuditLogger,
        config: EngineConfig,
    ) -> Self {
        Self {
            users,
            records,
            audit,
            config,
            mutation: Mutex::new(()),
        }
    }

    /// The audit trail for this engine instance.
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Create a new student record from a validated draft.
    ///
    /// Fails with `Error::Validation` if any required field is
    /// missing, without touching shared state. The new id comes from
    /// the store's dedicated counter.
    pub fn add_student_record(&self, draft: RecordDraft) -> Result<RecordId> {
        let fields = draft.validate()?;
        let id = self.records.next_id();
        let record = StudentRecord::create(id, fields, Utc::now());
        debug!(record_id = %id, department = %record.department, "student record created");
        self.records.insert(record);
        Ok(id)
    }

    /// Apply a versioned modification to a record's grades or
    /// attendance.
    ///
    /// Returns `true` only when the merge was applied; every refusal
    /// leaves the record (and its version history) untouched and is
    /// audited with `success = false`.
    pub fn modify_student_record(
        &self,
        user_id: UserId,
        record_id: RecordId,
        modifications: &BTreeMap<String, Value>,
        modification_type: &str,
    ) -> bool {
        let _guard = self.mutation.lock();

        let (user, mut record) = match (
            self.users.lookup_user(user_id),
            self.records.get(record_id),
        ) {
            (Some(user), Some(record)) => (user, record),
            _ => {
                self.audit.log(
                    user_id,
                    Operation::Modify,
                    Some(record_id),
                    "Invalid user or record",
                    false,
                );
                return false;
            }
        };

        if !can_modify_record(&user, &record) {
            self.audit.log(
                user_id,
                Operation::Modify,
                Some(record_id),
                Error::PermissionDenied.to_string(),
                false,
            );
            return false;
        }

        let Ok(kind) = modification_type.parse::<ModificationKind>() else {
            self.audit.log(
                user_id,
                Operation::Modify,
                Some(record_id),
                Error::InvalidModificationType(modification_type.to_string()).to_string(),
                false,
            );
            return false;
        };

        // Guards future non-staff roles; students are already refused
        // by the permission check above.
        if !user.role.is_staff() {
            return false;
        }

        record.apply_modifications(kind, modifications, user_id, Utc::now());
        self.records.put(record);

        let summary = serde_json::to_string(modifications).unwrap_or_default();
        self.audit.log(
            user_id,
            kind.operation(),
            Some(record_id),
            format!("Modified {kind}: {summary}"),
            true,
        );
        true
    }

    /// Export the acting user's accessible records to a file.
    ///
    /// Returns the written path, or `None` on any failure (unknown
    /// user, nothing accessible, unsupported format, I/O error). The
    /// destination path is resolved before any write is attempted,
    /// and the write is published atomically.
    pub fn export_data(
        &self,
        user_id: UserId,
        format: &str,
        export_type: &str,
        filepath: Option<&Path>,
    ) -> Option<PathBuf> {
        let Some(user) = self.users.lookup_user(user_id) else {
            self.audit.log(
                user_id,
                Operation::Export,
                None,
                Error::InvalidUser(user_id).to_string(),
                false,
            );
            return None;
        };

        let accessible: Vec<StudentRecord> = self
            .records
            .all()
            .into_iter()
            .filter(|record| can_access_record(&user, record))
            .collect();
        if accessible.is_empty() {
            self.audit.log(
                user_id,
                Operation::Export,
                None,
                Error::NoAccessibleRecords.to_string(),
                false,
            );
            return None;
        }

        let export_type = ExportType::from_label(export_type);
        let Ok(fmt) = format.parse::<ExportFormat>() else {
            self.audit.log(
                user_id,
                Operation::Export,
                None,
                Error::UnsupportedFormat(format.to_string()).to_string(),
                false,
            );
            return None;
        };

        let rows: Vec<Value> = accessible
            .iter()
            .map(|record| project(record, export_type))
            .collect();

        // Resolved unconditionally, before any write is attempted.
        let path = match filepath {
            Some(path) => path.to_path_buf(),
            None => self.config.export_dir.join(derive_filename(
                &user.department,
                export_type,
                fmt,
                Utc::now(),
            )),
        };

        match write_export(&path, &rows, export_type, fmt) {
            Ok(()) => {
                self.audit.log(
                    user_id,
                    Operation::Export,
                    None,
                    format!("Exported {} record(s) to {}", rows.len(), path.display()),
                    true,
                );
                Some(path)
            }
            Err(e) => {
                self.audit.log(
                    user_id,
                    Operation::Export,
                    None,
                    format!("Export failed: {e}"),
                    false,
                );
                None
            }
        }
    }
}
