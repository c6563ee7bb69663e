//! Top-level analysis pipeline.
//!
//! [`analyze_report`] is a pure function of the report text and the
//! threshold: parse, classify, aggregate, and bundle everything the
//! presentation layer needs into an [`AttendanceReport`].

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use attendance_core::classification::{reference_duration, Classifier};
use attendance_core::error::Result;
use attendance_core::models::{ClassifiedParticipant, ExportRow, MeetingMetadata, ReportWarning};
use attendance_core::stats::{self, HistogramBin, DEFAULT_HISTOGRAM_BINS};

use crate::aggregator::{AttendanceAggregator, AttendanceSummary};
use crate::composite::parse_composite_report;
use crate::table::ParticipantTable;

/// Number of rows shown in the raw-data preview.
pub const PREVIEW_ROWS: usize = 5;

/// The complete output of [`analyze_report`].
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub metadata: MeetingMetadata,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    /// Every loaded row, before deduplication.
    pub table: ParticipantTable,
    /// Denominator used for attendance percentages.
    pub reference_minutes: f64,
    pub threshold_percent: u8,
    /// Every row with its derived fields, before deduplication.
    pub classified: Vec<ClassifiedParticipant>,
    pub summary: AttendanceSummary,
    pub histogram: Vec<HistogramBin>,
    /// Non-fatal conditions, in the order they were found.
    pub warnings: Vec<ReportWarning>,
}

impl AttendanceReport {
    /// First rows of the loaded table, all columns, for the raw preview.
    pub fn preview(&self) -> Vec<Vec<String>> {
        self.table.preview(PREVIEW_ROWS)
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.summary.export_rows()
    }

    /// Whether the official duration from the meeting block was used.
    pub fn uses_official_duration(&self) -> bool {
        self.metadata.official_duration() == Some(self.reference_minutes)
    }
}

/// Run the full pipeline over one report.
///
/// 1. Split and parse the composite report.
/// 2. Choose the reference duration and classify every row.
/// 3. Deduplicate by identity and compute statistics.
pub fn analyze_report(raw: &str, threshold_percent: u8) -> Result<AttendanceReport> {
    let parsed = parse_composite_report(raw)?;

    let reference_minutes =
        reference_duration(parsed.metadata.official_duration(), &parsed.table.records);
    let classifier = Classifier::new(reference_minutes, threshold_percent);
    let classified = classifier.classify_all(&parsed.table.records);

    let summary = AttendanceAggregator::summarize(&classified, parsed.table.has_email_column());
    let histogram = stats::histogram(&summary.durations(), DEFAULT_HISTOGRAM_BINS);

    let mut warnings = parsed.warnings;
    warnings.extend(summary.warnings.iter().cloned());

    info!(
        "Analysed {} rows → {} participants (reference {} min, threshold {}%)",
        classified.len(),
        summary.total_unique,
        reference_minutes,
        classifier.threshold_percent()
    );

    let (start_time, end_time) = match parsed.timestamps {
        Some((s, e)) => (Some(s), Some(e)),
        None => (None, None),
    };

    Ok(AttendanceReport {
        metadata: parsed.metadata,
        start_time,
        end_time,
        table: parsed.table,
        reference_minutes: classifier.reference_minutes(),
        threshold_percent: classifier.threshold_percent(),
        classified,
        summary,
        histogram,
        warnings,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
