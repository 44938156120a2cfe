//! Record mutation and export orchestration for Acadia.
//!
//! Wires the access evaluator, audit logger, and export writers
//! behind the engine's public operations. Every public operation
//! resolves the acting user, consults the evaluator, applies (or
//! refuses) the effect, and records exactly one audit entry.

mod config;
mod engine;
mod store;

pub use config::EngineConfig;
pub use engine::RecordEngine;
pub use store::{MemoryRecordStore, MemoryUserStore, RecordStore};

pub use acadia_audit::UserLookup;
