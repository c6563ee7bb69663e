//! Cleaned-report export.
//!
//! Writes the deduplicated participant rows as UTF-8 CSV with a header row
//! and no index column, and renders whole reports as JSON.

use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use attendance_core::error::{ReportError, Result};
use attendance_core::models::{
    ExportRow, DURATION_COLUMN, EMAIL_COLUMN, NAME_COLUMN, PERCENT_COLUMN, STATUS_COLUMN,
};

use crate::analysis::AttendanceReport;

/// Header of the exported CSV, in column order.
pub const EXPORT_HEADERS: [&str; 5] = [
    NAME_COLUMN,
    EMAIL_COLUMN,
    DURATION_COLUMN,
    PERCENT_COLUMN,
    STATUS_COLUMN,
];

/// Write `rows` as CSV to `writer`. The header is written even when there are
/// no rows.
pub fn write_export_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    if rows.is_empty() {
        csv_writer.write_record(EXPORT_HEADERS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render `rows` as an in-memory CSV document.
pub fn export_csv_bytes(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_export_csv(rows, &mut buf)?;
    Ok(buf)
}

/// Write the export to `path`, replacing any existing file.
pub fn export_to_path(rows: &[ExportRow], path: &Path) -> Result<()> {
    let bytes = export_csv_bytes(rows)?;
    std::fs::write(path, bytes).map_err(|source| ReportError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read an exported CSV back into rows.
pub fn read_export_csv<R: Read>(reader: R) -> Result<Vec<ExportRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let rows = csv_reader
        .deserialize::<ExportRow>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Pretty-printed JSON rendering of a full report.
pub fn report_to_json(report: &AttendanceReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
