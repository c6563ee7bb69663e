use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical column name for the participant display name.
pub const NAME_COLUMN: &str = "Name";
/// Canonical column name for the participant e-mail address.
pub const EMAIL_COLUMN: &str = "UserEmail";
/// Canonical column name for the total minutes attended.
pub const DURATION_COLUMN: &str = "DurationMinutes";
/// Derived column: minutes attended as a percentage of the reference duration.
pub const PERCENT_COLUMN: &str = "AttendancePercent";
/// Derived column: the attendance bucket.
pub const STATUS_COLUMN: &str = "AttendanceStatus";

/// Zoom column header → canonical column name.
pub const COLUMN_RENAMES: [(&str, &str); 3] = [
    ("Name (original name)", NAME_COLUMN),
    ("Email", EMAIL_COLUMN),
    ("Total duration (minutes)", DURATION_COLUMN),
];

/// Return the canonical name for a raw Zoom column header.
///
/// Headers that are not renamed come back unchanged.
pub fn canonical_column_name(raw: &str) -> &str {
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

// ── MeetingMetadata ───────────────────────────────────────────────────────────

/// Key/value fields parsed from the report's meeting header block.
///
/// Fields are looked up, never required: an empty mapping means the block was
/// absent or malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingMetadata {
    fields: BTreeMap<String, String>,
}

impl MeetingMetadata {
    pub const TOPIC: &'static str = "Topic";
    pub const ID: &'static str = "ID";
    pub const HOST: &'static str = "Host";
    pub const DURATION: &'static str = "Duration (minutes)";
    pub const START_TIME: &'static str = "Start time";
    pub const END_TIME: &'static str = "End time";

    /// Build metadata by pairing field names with values.
    ///
    /// Returns `None` when the two sequences differ in length.
    pub fn from_pairs(names: &[String], values: &[String]) -> Option<Self> {
        if names.len() != values.len() {
            return None;
        }
        let fields = names
            .iter()
            .cloned()
            .zip(values.iter().cloned())
            .collect();
        Some(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field value, or `"N/A"` for display when the field is absent.
    pub fn display_value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("N/A")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Official meeting duration when it parses as a finite number above zero.
    pub fn official_duration(&self) -> Option<f64> {
        self.get(Self::DURATION)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
    }
}

// ── ParticipantRecord ─────────────────────────────────────────────────────────

/// One row of the participant table after column canonicalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    /// Empty when the report has no e-mail column or the cell is blank.
    pub user_email: String,
    /// Minutes attended, coerced to a non-negative number.
    pub duration_minutes: f64,
    /// Duration cell exactly as it appeared in the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
    /// Columns outside the canonical set, kept verbatim in file order.
    #[serde(default)]
    pub extra: Vec<(String, String)>,
}

impl ParticipantRecord {
    pub fn new(name: impl Into<String>, user_email: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            user_email: user_email.into(),
            duration_minutes: duration,
            duration_text: None,
            extra: Vec::new(),
        }
    }

    /// Cell text as read from the file; the duration keeps its original
    /// spelling even when it was coerced to `0`.
    pub fn raw_cell(&self, column: &str) -> Option<String> {
        match (column, &self.duration_text) {
            (DURATION_COLUMN, Some(text)) => Some(text.clone()),
            _ => self.cell(column),
        }
    }

    /// Cell text for a canonical or preserved column name.
    pub fn cell(&self, column: &str) -> Option<String> {
        match column {
            NAME_COLUMN => Some(self.name.clone()),
            EMAIL_COLUMN => Some(self.user_email.clone()),
            DURATION_COLUMN => Some(format_minutes_cell(self.duration_minutes)),
            other => self
                .extra
                .iter()
                .find(|(k, _)| k == other)
                .map(|(_, v)| v.clone()),
        }
    }
}

/// Render minutes without a trailing `.0` for whole numbers.
fn format_minutes_cell(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{}", minutes as i64)
    } else {
        format!("{}", minutes)
    }
}

// ── AttendanceStatus ──────────────────────────────────────────────────────────

/// Attendance bucket assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttendanceStatus {
    FullAttended,
    PartialAttended,
    DidNotAttend,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::FullAttended,
        AttendanceStatus::PartialAttended,
        AttendanceStatus::DidNotAttend,
    ];

    /// Stable identifier used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::FullAttended => "FullAttended",
            AttendanceStatus::PartialAttended => "PartialAttended",
            AttendanceStatus::DidNotAttend => "DidNotAttend",
        }
    }

    /// Human-readable label for the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::FullAttended => "Full Attended",
            AttendanceStatus::PartialAttended => "Partial Attended",
            AttendanceStatus::DidNotAttend => "Did Not Attend",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ClassifiedParticipant ─────────────────────────────────────────────────────

/// A participant row with its derived attendance fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedParticipant {
    pub record: ParticipantRecord,
    /// `duration / reference * 100`, rounded to two decimals.
    pub attendance_percent: f64,
    pub status: AttendanceStatus,
}

/// The export-ready projection of a classified participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "UserEmail")]
    pub user_email: String,
    #[serde(rename = "DurationMinutes")]
    pub duration_minutes: f64,
    #[serde(rename = "AttendancePercent")]
    pub attendance_percent: f64,
    #[serde(rename = "AttendanceStatus")]
    pub attendance_status: AttendanceStatus,
}

impl From<&ClassifiedParticipant> for ExportRow {
    fn from(p: &ClassifiedParticipant) -> Self {
        ExportRow {
            name: p.record.name.clone(),
            user_email: p.record.user_email.clone(),
            duration_minutes: p.record.duration_minutes,
            attendance_percent: p.attendance_percent,
            attendance_status: p.status,
        }
    }
}

// ── IdentityKey ───────────────────────────────────────────────────────────────

/// Field used to decide whether two rows are the same participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityKey {
    UserEmail,
    Name,
}

impl IdentityKey {
    /// The key value for `record`.
    pub fn value_of<'a>(&self, record: &'a ParticipantRecord) -> &'a str {
        match self {
            IdentityKey::UserEmail => &record.user_email,
            IdentityKey::Name => &record.name,
        }
    }

    /// Canonical column the key reads from.
    pub fn column(&self) -> &'static str {
        match self {
            IdentityKey::UserEmail => EMAIL_COLUMN,
            IdentityKey::Name => NAME_COLUMN,
        }
    }
}

// ── ReportWarning ─────────────────────────────────────────────────────────────

/// Non-fatal conditions recovered locally while analysing a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// No `Topic,ID,Host` header, or its value line did not line up.
    MetadataAbsent,
    /// Start or end time missing or not in `MM-DD-YYYY hh:mm:ss AM/PM` form.
    TimestampParseFailure { start: String, end: String },
    /// Every e-mail cell is blank; participants are identified by name.
    EmptyEmailColumn,
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::MetadataAbsent => f.write_str(
                "Could not parse meeting metadata (Topic, Start Time, etc.) from the file. \
                 Proceeding with participant data only.",
            ),
            ReportWarning::TimestampParseFailure { start, end } => write!(
                f,
                "Could not parse official start/end times ('{}', '{}'). Please check the format.",
                start, end
            ),
            ReportWarning::EmptyEmailColumn => f.write_str(
                "Email column is empty. Analysis will rely on unique names, \
                 which might not be perfectly unique.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── canonical_column_name ────────────────────────────────────────────────

    #[test]
    fn test_canonical_column_name_renames_known_headers() {
        assert_eq!(canonical_column_name("Name (original name)"), "Name");
        assert_eq!(canonical_column_name("Email"), "UserEmail");
        assert_eq!(canonical_column_name("Total duration (minutes)"), "DurationMinutes");
    }

    #[test]
    fn test_canonical_column_name_keeps_unknown_headers() {
        assert_eq!(canonical_column_name("Guest"), "Guest");
        assert_eq!(canonical_column_name("In waiting room"), "In waiting room");
    }

    // ── MeetingMetadata ──────────────────────────────────────────────────────

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_metadata_from_pairs_matching_lengths() {
        let meta = MeetingMetadata::from_pairs(
            &strings(&["Topic", "ID", "Duration (minutes)"]),
            &strings(&["Demo", "123", "60"]),
        )
        .expect("lengths match");
        assert_eq!(meta.get("Topic"), Some("Demo"));
        assert_eq!(meta.get("ID"), Some("123"));
        assert_eq!(meta.official_duration(), Some(60.0));
    }

    #[test]
    fn test_metadata_from_pairs_length_mismatch() {
        let meta = MeetingMetadata::from_pairs(&strings(&["Topic", "ID"]), &strings(&["Demo"]));
        assert!(meta.is_none());
    }

    #[test]
    fn test_metadata_display_value_defaults_to_na() {
        let meta = MeetingMetadata::default();
        assert!(meta.is_empty());
        assert_eq!(meta.display_value(MeetingMetadata::HOST), "N/A");
    }

    #[test]
    fn test_official_duration_rejects_zero_and_garbage() {
        let zero = MeetingMetadata::from_pairs(
            &strings(&["Duration (minutes)"]),
            &strings(&["0"]),
        )
        .unwrap();
        assert_eq!(zero.official_duration(), None);

        let garbage = MeetingMetadata::from_pairs(
            &strings(&["Duration (minutes)"]),
            &strings(&["sixty"]),
        )
        .unwrap();
        assert_eq!(garbage.official_duration(), None);
    }

    // ── ParticipantRecord ────────────────────────────────────────────────────

    #[test]
    fn test_record_cell_lookup() {
        let mut rec = ParticipantRecord::new("Bob", "bob@x.com", 45.0);
        rec.extra.push(("Guest".to_string(), "No".to_string()));
        assert_eq!(rec.cell("Name").as_deref(), Some("Bob"));
        assert_eq!(rec.cell("UserEmail").as_deref(), Some("bob@x.com"));
        assert_eq!(rec.cell("DurationMinutes").as_deref(), Some("45"));
        assert_eq!(rec.cell("Guest").as_deref(), Some("No"));
        assert_eq!(rec.cell("Missing"), None);
    }

    #[test]
    fn test_record_cell_fractional_duration() {
        let rec = ParticipantRecord::new("Ann", "", 12.5);
        assert_eq!(rec.cell("DurationMinutes").as_deref(), Some("12.5"));
        assert_eq!(rec.raw_cell("DurationMinutes").as_deref(), Some("12.5"));
    }

    // ── AttendanceStatus ─────────────────────────────────────────────────────

    #[test]
    fn test_status_identifiers_and_labels() {
        assert_eq!(AttendanceStatus::FullAttended.to_string(), "FullAttended");
        assert_eq!(AttendanceStatus::DidNotAttend.as_str(), "DidNotAttend");
        assert_eq!(AttendanceStatus::PartialAttended.label(), "Partial Attended");
    }

    #[test]
    fn test_status_serializes_as_identifier() {
        let json = serde_json::to_string(&AttendanceStatus::PartialAttended).unwrap();
        assert_eq!(json, "\"PartialAttended\"");
    }

    // ── IdentityKey ──────────────────────────────────────────────────────────

    #[test]
    fn test_identity_key_value_of() {
        let rec = ParticipantRecord::new("Carol", "carol@x.com", 0.0);
        assert_eq!(IdentityKey::UserEmail.value_of(&rec), "carol@x.com");
        assert_eq!(IdentityKey::Name.value_of(&rec), "Carol");
    }

    // ── ReportWarning ────────────────────────────────────────────────────────

    #[test]
    fn test_warning_display_mentions_cause() {
        assert!(ReportWarning::MetadataAbsent
            .to_string()
            .contains("Could not parse meeting metadata"));
        assert!(ReportWarning::EmptyEmailColumn
            .to_string()
            .contains("Email column is empty"));
        let ts = ReportWarning::TimestampParseFailure {
            start: "yesterday".into(),
            end: "today".into(),
        };
        assert!(ts.to_string().contains("'yesterday'"));
    }
}
