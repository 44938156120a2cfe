//! Append-only log sinks.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// An external append-only destination for formatted audit lines.
///
/// Delivery order matches call order; a failed append is reported to
/// the caller but must never abort the audited operation.
pub trait AuditSink: Send + Sync {
    /// Append one formatted line.
    fn append(&self, line: &str) -> io::Result<()>;
}

impl<S: AuditSink + ?Sized> AuditSink for std::sync::Arc<S> {
    fn append(&self, line: &str) -> io::Result<()> {
        (**self).append(line)
    }
}

/// Sink that appends lines to a file on disk.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) the file in append mode.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileSink {
    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = self.file.lock();
        writeln!(file, "{line}")?;
        file.flush()
    }
}

/// Sink that keeps lines in memory; for tests and embedding.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines delivered so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl AuditSink for MemorySink {
    fn append(&self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}

/// Sink that drops every line.
#[derive(Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn append(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}
