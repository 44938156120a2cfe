//! Append-only, tamper-evident audit logging for Acadia.
//!
//! The [`AuditLogger`] owns the in-memory audit sequence, extends a
//! SHA-256 hash chain over every appended entry, and forwards a
//! formatted line to an injected [`AuditSink`]. Sink delivery failures
//! never fail the audited operation.

mod chain;
mod logger;
mod sink;

pub use chain::{ChainError, ChainLink, EntryChain};
pub use logger::{AuditConfig, AuditLogger, UserLookup};
pub use sink::{AuditSink, FileSink, MemorySink, NullSink};
