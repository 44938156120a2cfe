//! Export writers and atomic file publication.

use crate::export::{ExportError, ExportFormat, ExportResult, ExportType};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Trait for export writers.
pub trait ExportWriter: Send {
    /// Write the export header.
    fn write_header(&mut self) -> ExportResult<()>;

    /// Write a single projected record.
    fn write_record(&mut self, projection: &Value) -> ExportResult<()>;

    /// Write the export footer.
    fn write_footer(&mut self) -> ExportResult<()>;

    /// Flush all buffered data.
    fn flush(&mut self) -> ExportResult<()>;
}

/// Create an export writer for the given type and format.
pub fn create_exporter<W: Write + Send + 'static>(
    writer: W,
    export_type: ExportType,
    format: ExportFormat,
) -> Box<dyn ExportWriter> {
    match format {
        ExportFormat::Json => Box::new(JsonPrettyExporter::new(writer)),
        ExportFormat::Csv => Box::new(CsvExporter::new(writer, export_type)),
    }
}

/// Pretty-printed JSON array exporter (2-space indent).
pub struct JsonPrettyExporter<W: Write> {
    writer: W,
    rows: Vec<Value>,
}

impl<W: Write> JsonPrettyExporter<W> {
    /// Create a JSON exporter over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }
}

impl<W: Write + Send> ExportWriter for JsonPrettyExporter<W> {
    fn write_header(&mut self) -> ExportResult<()> {
        Ok(())
    }

    fn write_record(&mut self, projection: &Value) -> ExportResult<()> {
        self.rows.push(projection.clone());
        Ok(())
    }

    fn write_footer(&mut self) -> ExportResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
        Ok(())
    }

    fn flush(&mut self) -> ExportResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// CSV exporter: header row from the projection's field list, one
/// data row per record. Nested sub-maps are serialized as JSON text
/// inside their cell.
pub struct CsvExporter<W: Write> {
    writer: W,
    fields: &'static [&'static str],
}

impl<W: Write> CsvExporter<W> {
    /// Create a CSV exporter over `writer` for `export_type`'s fields.
    pub fn new(writer: W, export_type: ExportType) -> Self {
        Self {
            writer,
            fields: export_type.fields(),
        }
    }

    fn write_row(&mut self, cells: &[String]) -> ExportResult<()> {
        let line = cells
            .iter()
            .map(|cell| escape_cell(cell))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

impl<W: Write + Send> ExportWriter for CsvExporter<W> {
    fn write_header(&mut self) -> ExportResult<()> {
        let header: Vec<String> = self.fields.iter().map(|f| f.to_string()).collect();
        self.write_row(&header)
    }

    fn write_record(&mut self, projection: &Value) -> ExportResult<()> {
        let obj = projection
            .as_object()
            .ok_or_else(|| ExportError::Format("projected record is not an object".into()))?;
        let mut cells = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            cells.push(render_cell(obj.get(*field).unwrap_or(&Value::Null))?);
        }
        self.write_row(&cells)
    }

    fn write_footer(&mut self) -> ExportResult<()> {
        Ok(())
    }

    fn flush(&mut self) -> ExportResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn render_cell(value: &Value) -> ExportResult<String> {
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
    })
}

fn escape_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn write_rows<W: Write + Send>(
    writer: W,
    rows: &[Value],
    export_type: ExportType,
    format: ExportFormat,
) -> ExportResult<()> {
    match format {
        ExportFormat::Json => {
            let mut exporter = JsonPrettyExporter::new(writer);
            run(&mut exporter, rows)
        }
        ExportFormat::Csv => {
            let mut exporter = CsvExporter::new(writer, export_type);
            run(&mut exporter, rows)
        }
    }
}

fn run<E: ExportWriter>(exporter: &mut E, rows: &[Value]) -> ExportResult<()> {
    exporter.write_header()?;
    for row in rows {
        exporter.write_record(row)?;
    }
    exporter.write_footer()?;
    exporter.flush()
}

/// Serialize `rows` to `path`, going through a temporary file in the
/// same directory and persisting it atomically so no partial export
/// ever becomes visible.
pub fn write_export(
    path: &Path,
    rows: &[Value],
    export_type: ExportType,
    format: ExportFormat,
) -> ExportResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write_rows(&mut tmp, rows, export_type, format)?;
    tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;
    Ok(())
}
