//! Record projection and export writers for Acadia.
//!
//! Projects accessible records into a reduced field set per export
//! type, then serializes them as pretty JSON or CSV. Files are
//! written to a temporary location and atomically published so a
//! failed export never leaves a partial file visible.

mod export;
mod projection;
mod writer;

pub use export::{
    derive_filename, ExportError, ExportFormat, ExportResult, ExportType,
};
pub use projection::project;
pub use writer::{create_exporter, write_export, CsvExporter, ExportWriter, JsonPrettyExporter};
