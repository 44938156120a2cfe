//! Audit trail entries.

use crate::{Operation, Role};
use acadia_common_core::{RecordId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable record of one attempted operation.
///
/// `seq` is assigned by the logger at append time and is strictly
/// increasing; entry order equals creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Position in the append-only audit sequence.
    pub seq: u64,
    /// When the attempt was recorded.
    pub timestamp: DateTime<Utc>,
    /// The acting user.
    pub user_id: UserId,
    /// The acting user's role at the time.
    pub role: Role,
    /// What was attempted.
    pub operation: Operation,
    /// The target record, when the operation has one.
    pub record_id: Option<RecordId>,
    /// The acting user's department.
    pub department: String,
    /// Human-readable description of the attempt.
    pub details: String,
    /// Whether the operation's effect was applied.
    pub success: bool,
}

impl AuditLogEntry {
    /// Format the human-readable line forwarded to the audit sink.
    pub fn render_line(&self, actor_name: &str) -> String {
        let record = match self.record_id {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        };
        format!(
            "{} {} ({}) - {} - Record {} - {} - {}",
            self.role,
            actor_name,
            self.department,
            self.operation,
            record,
            self.details,
            if self.success { "Success" } else { "Failed" },
        )
    }
}
