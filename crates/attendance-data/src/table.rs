//! Participant table loading.
//!
//! Parses the table block as comma-delimited text with a header row, renames
//! the Zoom columns to their canonical names and coerces durations.

use serde::Serialize;
use tracing::debug;

use attendance_core::error::{ReportError, Result};
use attendance_core::models::{
    canonical_column_name, ParticipantRecord, DURATION_COLUMN, EMAIL_COLUMN, NAME_COLUMN,
};

/// Loaded participant rows plus the column layout they came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParticipantTable {
    /// Column names after renaming, in file order.
    pub columns: Vec<String>,
    pub records: Vec<ParticipantRecord>,
}

impl ParticipantTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn has_email_column(&self) -> bool {
        self.has_column(EMAIL_COLUMN)
    }

    /// First `n` rows as read from the file, in column order.
    pub fn preview(&self, n: usize) -> Vec<Vec<String>> {
        self.records
            .iter()
            .take(n)
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| r.raw_cell(c).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Coerce a duration cell to a non-negative number of minutes.
///
/// Anything that is not a finite, non-negative number becomes `0`.
pub fn coerce_duration(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn map_csv_error(err: csv::Error) -> ReportError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
            ReportError::TableParse(format!(
                "expected {} fields in line {} of the participant table, saw {}",
                expected_len, line, len
            ))
        }
        _ => ReportError::Csv(err),
    }
}

/// Parse the table block lines (header first) into participant records.
pub fn load_table(lines: &[String]) -> Result<ParticipantTable> {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return Err(ReportError::TableParse(
            "no participant table found; expected a line starting with \
             'Name (original name),Email'"
                .to_string(),
        ));
    }

    let text = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(map_csv_error)?
        .iter()
        .map(|h| canonical_column_name(h.trim()).to_string())
        .collect();

    let position = |name: &str| columns.iter().position(|c| c == name);
    let name_idx = position(NAME_COLUMN)
        .ok_or_else(|| ReportError::MissingColumn(NAME_COLUMN.to_string()))?;
    let duration_idx = position(DURATION_COLUMN)
        .ok_or_else(|| ReportError::MissingColumn(DURATION_COLUMN.to_string()))?;
    let email_idx = position(EMAIL_COLUMN);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(map_csv_error)?;
        let cell = |i: usize| row.get(i).unwrap_or_default().to_string();

        let extra = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != name_idx && *i != duration_idx && Some(*i) != email_idx)
            .map(|(i, c)| (c.clone(), cell(i)))
            .collect();

        let duration_text = cell(duration_idx);
        records.push(ParticipantRecord {
            name: cell(name_idx),
            user_email: email_idx.map(cell).unwrap_or_default(),
            duration_minutes: coerce_duration(&duration_text),
            duration_text: Some(duration_text),
            extra,
        });
    }

    debug!(
        "Loaded {} participant rows with columns {:?}",
        records.len(),
        columns
    );

    Ok(ParticipantTable { columns, records })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    const HEADER: &str = "Name (original name),Email,Total duration (minutes),Guest";

    // ── coerce_duration ──────────────────────────────────────────────────────

    #[test]
    fn test_coerce_duration() {
        assert_eq!(coerce_duration("45"), 45.0);
        assert_eq!(coerce_duration(" 12.5 "), 12.5);
        assert_eq!(coerce_duration(""), 0.0);
        assert_eq!(coerce_duration("n/a"), 0.0);
        assert_eq!(coerce_duration("-5"), 0.0);
        assert_eq!(coerce_duration("NaN"), 0.0);
        assert_eq!(coerce_duration("inf"), 0.0);
    }

    // ── load_table ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_table_renames_and_preserves_columns() {
        let table = load_table(&lines(&[HEADER, "Bob,bob@x.com,45,No"])).expect("loads");
        assert_eq!(
            table.columns,
            vec!["Name", "UserEmail", "DurationMinutes", "Guest"]
        );
        let bob = &table.records[0];
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.user_email, "bob@x.com");
        assert_eq!(bob.duration_minutes, 45.0);
        assert_eq!(bob.extra, vec![("Guest".to_string(), "No".to_string())]);
        assert!(table.has_email_column());
    }

    #[test]
    fn test_load_table_coerces_bad_durations_to_zero() {
        let table = load_table(&lines(&[HEADER, "Ann,a@x.com,abc,No", "Carol,,,Yes"])).unwrap();
        assert_eq!(table.records[0].duration_minutes, 0.0);
        assert_eq!(table.records[1].duration_minutes, 0.0);
        assert_eq!(table.records[1].user_email, "");
    }

    #[test]
    fn test_load_table_handles_quoted_fields() {
        let table =
            load_table(&lines(&[HEADER, "\"Smith, Jane\",jane@x.com,30,No"])).expect("loads");
        assert_eq!(table.records[0].name, "Smith, Jane");
        assert_eq!(table.records[0].duration_minutes, 30.0);
    }

    #[test]
    fn test_load_table_header_only_is_empty() {
        let table = load_table(&lines(&[HEADER])).expect("loads");
        assert!(table.records.is_empty());
        assert_eq!(table.columns.len(), 4);
    }

    #[test]
    fn test_load_table_without_email_column() {
        let table = load_table(&lines(&[
            "Name (original name),Total duration (minutes)",
            "Bob,45",
        ]))
        .expect("loads");
        assert!(!table.has_email_column());
        assert_eq!(table.records[0].user_email, "");
    }

    #[test]
    fn test_load_table_empty_block_fails() {
        let err = load_table(&[]).unwrap_err();
        assert!(matches!(err, ReportError::TableParse(_)));
        assert!(err.to_string().contains("Name (original name)"));
    }

    #[test]
    fn test_load_table_unequal_row_fails() {
        let err = load_table(&lines(&[HEADER, "Bob,bob@x.com,45,No", "Eve,e@x.com,10,No,extra"]))
            .unwrap_err();
        match err {
            ReportError::TableParse(msg) => {
                assert!(msg.contains("expected 4 fields"), "msg: {msg}");
                assert!(msg.contains("saw 5"), "msg: {msg}");
            }
            other => panic!("expected TableParse, got {other:?}"),
        }
    }

    #[test]
    fn test_load_table_missing_duration_column() {
        let err = load_table(&lines(&["Name (original name),Email", "Bob,bob@x.com"])).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(ref c) if c == "DurationMinutes"));
    }

    // ── preview ──────────────────────────────────────────────────────────────

    #[test]
    fn test_preview_limits_rows_and_keeps_column_order() {
        let mut rows = vec![HEADER.to_string()];
        for i in 0..8 {
            rows.push(format!("P{i},p{i}@x.com,{i},No"));
        }
        let table = load_table(&rows).unwrap();
        let preview = table.preview(5);
        assert_eq!(preview.len(), 5);
        assert_eq!(preview[2], vec!["P2", "p2@x.com", "2", "No"]);
    }

    #[test]
    fn test_preview_shows_duration_as_written() {
        let table = load_table(&lines(&[
            HEADER,
            "Ann,a@x.com,abc,No",
            "Carol,c@x.com,,Yes",
            "Dan,d@x.com,30.50,No",
        ]))
        .unwrap();
        assert_eq!(table.records[0].duration_minutes, 0.0);
        let preview = table.preview(5);
        assert_eq!(preview[0], vec!["Ann", "a@x.com", "abc", "No"]);
        assert_eq!(preview[1][2], "");
        assert_eq!(preview[2][2], "30.50");
    }
}
