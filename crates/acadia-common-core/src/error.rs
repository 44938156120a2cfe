//! Error types for Acadia.

use crate::id::{RecordId, UserId};
use thiserror::Error;

/// The main error type for Acadia operations.
///
/// Public engine operations handle these locally (sentinel return plus
/// an audit entry); only record-creation validation surfaces one to
/// the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The acting user could not be resolved.
    #[error("Invalid user {0}")]
    InvalidUser(UserId),

    /// The target record could not be resolved.
    #[error("Invalid record {0}")]
    InvalidRecord(RecordId),

    /// The acting user may not perform the operation.
    #[error("Permission denied")]
    PermissionDenied,

    /// The modification type is not one of the known sub-maps.
    #[error("Invalid modification type {0:?}")]
    InvalidModificationType(String),

    /// The acting user can access no records at all.
    #[error("No records to export")]
    NoAccessibleRecords,

    /// The requested export format is not supported.
    #[error("Unsupported export format {0:?}")]
    UnsupportedFormat(String),

    /// Export failed while writing the destination file.
    #[error("Export failed: {0}")]
    ExportIo(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A required creation field is missing or empty.
    #[error("Missing required field {0:?}")]
    Validation(String),
}

impl Error {
    /// Create a validation error for a missing field.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::Validation(field.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl std::fmt::Display) -> Self {
        Self::Serialization(msg.to_string())
    }
}

/// Result type alias using Acadia's Error.
pub type Result<T> = std::result::Result<T, Error>;
