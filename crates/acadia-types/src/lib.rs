//! Domain types for Acadia.
//!
//! Passive value types shared by the access evaluator, audit logger,
//! record engine, and export engine. Nothing in here performs I/O or
//! holds locks.

mod entry;
mod operation;
mod record;
mod role;
mod user;

pub use entry::AuditLogEntry;
pub use operation::Operation;
pub use record::{
    ModificationKind, RecordData, RecordDraft, RecordFields, StudentRecord, VersionSnapshot,
};
pub use role::Role;
pub use user::User;
