//! Meeting metadata extraction from the block above the participant table.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use attendance_core::models::{MeetingMetadata, ReportWarning};
use attendance_core::time_utils::parse_timestamp_pair;

/// Start of the meeting header line.
pub const METADATA_HEADER_PREFIX: &str = "Topic,ID,Host";

/// Result of [`extract_metadata`].
#[derive(Debug, Clone, Default)]
pub struct MetadataExtraction {
    /// Empty when the block was absent or its lines did not line up.
    pub metadata: MeetingMetadata,
    /// Official start and end time; both or neither.
    pub timestamps: Option<(NaiveDateTime, NaiveDateTime)>,
    pub warnings: Vec<ReportWarning>,
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|p| p.trim().to_string()).collect()
}

/// Parse the meeting header/value line pair and its timestamps.
///
/// The value line is the first non-empty line after the header line. When the
/// two lines have different field counts the metadata is left empty.
pub fn extract_metadata(lines: &[String]) -> MetadataExtraction {
    let cleaned: Vec<&str> = lines
        .iter()
        .map(|raw| raw.trim().trim_start_matches('\u{feff}'))
        .collect();

    let mut metadata = MeetingMetadata::default();
    if let Some(pos) = cleaned
        .iter()
        .position(|line| line.starts_with(METADATA_HEADER_PREFIX))
    {
        let names = split_fields(cleaned[pos]);
        if let Some(value_line) = cleaned[pos + 1..].iter().find(|line| !line.is_empty()) {
            let values = split_fields(value_line);
            match MeetingMetadata::from_pairs(&names, &values) {
                Some(m) => metadata = m,
                None => debug!(
                    "Meeting header has {} fields but value line has {}",
                    names.len(),
                    values.len()
                ),
            }
        }
    }

    let mut extraction = MetadataExtraction::default();

    if metadata.is_empty() {
        warn!("{}", ReportWarning::MetadataAbsent);
        extraction.warnings.push(ReportWarning::MetadataAbsent);
        return extraction;
    }

    let start = metadata.get(MeetingMetadata::START_TIME);
    let end = metadata.get(MeetingMetadata::END_TIME);
    extraction.timestamps = parse_timestamp_pair(start, end);
    if extraction.timestamps.is_none() {
        let warning = ReportWarning::TimestampParseFailure {
            start: start.unwrap_or_default().to_string(),
            end: end.unwrap_or_default().to_string(),
        };
        warn!("{}", warning);
        extraction.warnings.push(warning);
    }

    debug!("Parsed {} meeting metadata fields", metadata.len());
    extraction.metadata = metadata;
    extraction
}

// ── Tests ─────────────────────────────────────────────────────────────────────
