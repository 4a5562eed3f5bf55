//! Delimited-text export of the result table.

use std::fs;
use std::path::PathBuf;

use checklast_spi::{BackCount, CheckLastError, Column, ExportSink, Result};
use tracing::info;

use crate::table::{SortKey, TableProjection};
use crate::tracker::AnomalyTracker;

/// Export columns: the display columns with `Status` after `Last period`.
pub fn export_columns(back_count: BackCount) -> Vec<Column> {
    let mut columns = TableProjection::columns_for(back_count);
    columns.insert(2, Column::Status);
    columns
}

/// Serialize a table, header row first. Empty cells become empty fields.
pub fn to_delimited(table: &TableProjection, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(table.headers()).map_err(export_error)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CheckLastError::ExportFailure(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CheckLastError::ExportFailure(e.to_string()))
}

/// Parse delimited text back into rows of fields, header row included.
pub fn read_delimited(text: &str, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|fields| fields.iter().map(str::to_string).collect())
                .map_err(|e| CheckLastError::Parse(e.to_string()))
        })
        .collect()
}

pub(crate) fn export(
    tracker: &AnomalyTracker,
    sink: &mut dyn ExportSink,
    key: Option<SortKey>,
) -> Result<()> {
    if tracker.is_empty() {
        return Err(CheckLastError::ExportFailure(
            "no series to export".to_string(),
        ));
    }
    let table = tracker.export_table().sorted(key)?;
    let text = to_delimited(&table, sink.delimiter())?;
    sink.deliver(&text)?;
    info!(rows = table.row_count(), "results exported");
    Ok(())
}

fn export_error(err: csv::Error) -> CheckLastError {
    CheckLastError::ExportFailure(err.to_string())
}

/// In-memory, clipboard-style sink; tab separated.
#[derive(Debug, Clone, Default)]
pub struct ClipboardSink {
    contents: Option<String>,
}

impl ClipboardSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last delivered content.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ExportSink for ClipboardSink {
    fn delimiter(&self) -> u8 {
        b'\t'
    }

    fn deliver(&mut self, content: &str) -> Result<()> {
        self.contents = Some(content.to_string());
        Ok(())
    }
}

/// Writes the export to a file, comma separated unless told otherwise.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    delimiter: u8,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ExportSink for FileSink {
    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn deliver(&mut self, content: &str) -> Result<()> {
        fs::write(&self.path, content).map_err(|e| {
            CheckLastError::ExportFailure(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_columns() {
        let columns = export_columns(BackCount::new(2).unwrap());
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[2], Column::Status);
        assert_eq!(columns[6], Column::RelativeError(1));
    }

    #[test]
    fn test_read_delimited_keeps_empty_fields() {
        let rows = read_delimited("a\tb\tc\nx\t\t1.5\n", b'\t').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["x".to_string(), String::new(), "1.5".to_string()]);
    }

    #[test]
    fn test_file_sink_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing").join("out.csv"));
        let err = sink.deliver("a,b\n").unwrap_err();
        assert!(matches!(err, CheckLastError::ExportFailure(_)));
    }

    #[test]
    fn test_clipboard_sink_uses_tabs() {
        let mut sink = ClipboardSink::new();
        assert_eq!(sink.delimiter(), b'\t');
        sink.deliver("x").unwrap();
        assert_eq!(sink.contents(), Some("x"));
    }
}
