//! Composite report splitting.
//!
//! A Zoom participant report is one text file holding a meeting block
//! (`Topic,ID,Host,...` header and value lines) followed by the participant
//! table. The table starts at the first line beginning with
//! [`TABLE_MARKER`]; everything before it is the meeting block.

use chrono::NaiveDateTime;
use tracing::debug;

use attendance_core::error::Result;
use attendance_core::models::{MeetingMetadata, ReportWarning};

use crate::metadata::extract_metadata;
use crate::table::{load_table, ParticipantTable};

/// First columns of the participant table header.
pub const TABLE_MARKER: &str = "Name (original name),Email";

/// Trailer lines Zoom appends after the participant table.
pub const FOOTER_PREFIX: &str = "Zoom Report";

const BOM: char = '\u{feff}';

// ── Line blocks ───────────────────────────────────────────────────────────────

/// The two line groups of a composite report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBlocks {
    /// Lines before the table marker, unmodified.
    pub metadata_lines: Vec<String>,
    /// The table header line followed by every non-blank, non-footer line.
    pub table_lines: Vec<String>,
}

/// Split text on `\r\n`, `\n` or a lone `\r`. A trailing terminator does not
/// produce an empty final line.
pub fn split_lines(raw: &str) -> Vec<&str> {
    let bytes = raw.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&raw[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&raw[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < raw.len() {
        lines.push(&raw[start..]);
    }
    lines
}

/// Split raw report text into its meeting block and participant table block.
pub fn split_blocks(raw: &str) -> ReportBlocks {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);
    let mut blocks = ReportBlocks::default();
    let mut table_started = false;

    for line in split_lines(text) {
        let trimmed = line.trim();
        if !table_started {
            if trimmed.starts_with(TABLE_MARKER) {
                table_started = true;
                blocks.table_lines.push(line.to_string());
            } else {
                blocks.metadata_lines.push(line.to_string());
            }
        } else if !trimmed.is_empty() && !trimmed.starts_with(FOOTER_PREFIX) {
            blocks.table_lines.push(line.to_string());
        }
    }

    debug!(
        "Split report into {} metadata lines and {} table lines (marker found: {})",
        blocks.metadata_lines.len(),
        blocks.table_lines.len(),
        table_started
    );
    blocks
}

// ── Composite parse ───────────────────────────────────────────────────────────

/// Everything parsed out of one report before classification.
#[derive(Debug, Clone)]
pub struct CompositeReport {
    pub metadata: MeetingMetadata,
    /// Official start/end, present only when both parsed.
    pub timestamps: Option<(NaiveDateTime, NaiveDateTime)>,
    pub table: ParticipantTable,
    pub warnings: Vec<ReportWarning>,
}

/// Parse a full report into metadata, participant rows and warnings.
///
/// Metadata problems are recorded as warnings; a missing or malformed table
/// is an error.
pub fn parse_composite_report(raw: &str) -> Result<CompositeReport> {
    let blocks = split_blocks(raw);
    let extraction = extract_metadata(&blocks.metadata_lines);
    let table = load_table(&blocks.table_lines)?;

    Ok(CompositeReport {
        metadata: extraction.metadata,
        timestamps: extraction.timestamps,
        table,
        warnings: extraction.warnings,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
