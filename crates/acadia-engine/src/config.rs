//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a [`RecordEngine`](crate::RecordEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory for exports whose path the caller did not supply.
    pub export_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
        }
    }
}
