//! The audit logger.

use crate::chain::{ChainError, EntryChain};
use crate::sink::AuditSink;
use acadia_common_core::{RecordId, UserId};
use acadia_types::{AuditLogEntry, Operation, User};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves an acting user id to its identity.
///
/// Owned by the external identity store; the logger only reads.
pub trait UserLookup: Send + Sync {
    /// Look up a user by id.
    fn lookup_user(&self, id: UserId) -> Option<User>;
}

/// Audit logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Also emit each formatted line through `tracing` at debug level.
    pub echo_to_tracing: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            echo_to_tracing: true,
        }
    }
}

struct LogState {
    entries: Vec<AuditLogEntry>,
    chain: EntryChain,
}

/// Append-only audit logger.
///
/// Appends are serialized under one lock, so each entry lands
/// atomically with a strictly increasing `seq`; the formatted line is
/// forwarded to the sink after the append, and sink failures are
/// reported via `tracing` without failing the audited operation.
pub struct AuditLogger {
    users: Arc<dyn UserLookup>,
    sink: Box<dyn AuditSink>,
    state: Mutex<LogState>,
    config: AuditConfig,
}

impl AuditLogger {
    /// Create a logger with the default configuration.
    pub fn new(users: Arc<dyn UserLookup>, sink: Box<dyn AuditSink>) -> Self {
        Self::with_config(users, sink, AuditConfig::default())
    }

    /// Create a logger with an explicit configuration.
    pub fn with_config(
        users: Arc<dyn UserLookup>,
        sink: Box<dyn AuditSink>,
        config: AuditConfig,
    ) -> Self {
        Self {
            users,
            sink,
            state: Mutex::new(LogState {
                entries: Vec::new(),
                chain: EntryChain::new(),
            }),
            config,
        }
    }

    /// Record one attempted operation.
    ///
    /// If `user_id` cannot be resolved the attempt leaves no entry;
    /// the drop is surfaced as a `tracing` warning. (The entry schema
    /// requires the actor's role and department, which an unresolved
    /// id cannot supply.)
    pub fn log(
        &self,
        user_id: UserId,
        operation: Operation,
        record_id: Option<RecordId>,
        details: impl Into<String>,
        success: bool,
    ) {
        let Some(user) = self.users.lookup_user(user_id) else {
            warn!(%user_id, ?operation, "audit entry dropped: unknown user");
            return;
        };

        let details = details.into();
        let line = {
            let mut state = self.state.lock();
            let entry = AuditLogEntry {
                seq: state.entries.len() as u64,
                timestamp: Utc::now(),
                user_id,
                role: user.role,
                operation,
                record_id,
                department: user.department.clone(),
                details,
                success,
            };
            let payload = serde_json::to_vec(&entry).unwrap_or_default();
            state.chain.append(&payload);
            let line = entry.render_line(&user.name);
            state.entries.push(entry);
            line
        };

        if let Err(e) = self.sink.append(&line) {
            warn!(error = %e, "audit sink append failed");
        }
        if self.config.echo_to_tracing {
            debug!(target: "audit", "{line}");
        }
    }

    /// Snapshot of all entries, in append order.
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.state.lock().entries.clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify the hash chain and that every stored entry still
    /// matches its link.
    pub fn verify_integrity(&self) -> Result<(), ChainError> {
        let state = self.state.lock();
        state.chain.verify()?;
        for entry in &state.entries {
            let payload = serde_json::to_vec(entry).unwrap_or_default();
            let covered = state
                .chain
                .get(entry.seq)
                .is_some_and(|link| link.covers(&payload));
            if !covered {
                return Err(ChainError::EntryMismatch { seq: entry.seq });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use acadia_types::Role;
    use std::collections::HashMap;

    struct FixedUsers(HashMap<UserId, User>);

    impl UserLookup for FixedUsers {
        fn lookup_user(&self, id: UserId) -> Option<User> {
            self.0.get(&id).cloned()
        }
    }

    fn staff(id: u64, dept: &str) -> User {
        User::new(UserId::new(id), "staff", Role::DeptStaff, "Meera Iyer", dept, "-")
    }

    fn logger_with(users: Vec<User>) -> (AuditLogger, Arc<MemorySink>) {
        let map = users.into_iter().map(|u| (u.id, u)).collect();
        let sink = Arc::new(MemorySink::new());
        let logger = AuditLogger::new(Arc::new(FixedUsers(map)), Box::new(sink.clone()));
        (logger, sink)
    }

    #[test]
    fn test_log_appends_entry_and_line() {
        let (logger, sink) = logger_with(vec![staff(2, "AIML")]);
        logger.log(
            UserId::new(2),
            Operation::GradeEntry,
            Some(RecordId::new(5)),
            "Modified grades",
            true,
        );

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].seq, 0);
        assert_eq!(entries[0].role, Role::DeptStaff);
        assert_eq!(entries[0].department, "AIML");
        assert!(entries[0].success);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Entered Grades"));
        assert!(lines[0].ends_with("Success"));
    }

    #[test]
    fn test_seq_is_strictly_increasing() {
        let (logger, _) = logger_with(vec![staff(2, "AIML")]);
        for i in 0..5 {
            logger.log(
                UserId::new(2),
                Operation::Modify,
                Some(RecordId::new(i)),
                "x",
                false,
            );
        }
        let seqs: Vec<u64> = logger.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_user_leaves_no_trail() {
        let (logger, sink) = logger_with(vec![]);
        logger.log(UserId::new(42), Operation::Export, None, "x", false);
        assert!(logger.is_empty());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_integrity_holds_after_appends() {
        let (logger, _) = logger_with(vec![staff(2, "AIML")]);
        logger.log(UserId::new(2), Operation::Export, None, "a", true);
        logger.log(UserId::new(2), Operation::Export, None, "b", false);
        assert!(logger.verify_integrity().is_ok());
    }
}
