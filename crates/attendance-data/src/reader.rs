//! Report file loading.
//!
//! Reads one uploaded report into memory and decodes it as UTF-8 text.
//! Byte-order marks are left in place for the composite parser to strip.

use std::path::Path;

use attendance_core::error::{ReportError, Result};
use tracing::debug;

/// Read the report at `path` as UTF-8 text.
pub fn read_report_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_report(bytes, path)
}

/// Decode raw report bytes; `path` is only used for the error message.
pub fn decode_report(bytes: Vec<u8>, path: &Path) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| ReportError::Decode(path.to_path_buf()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
