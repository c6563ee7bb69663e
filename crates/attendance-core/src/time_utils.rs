use chrono::NaiveDateTime;
use tracing::debug;

/// Timestamp layout Zoom uses in participant reports, e.g.
/// `01-01-2024 09:00:00 AM`.
pub const ZOOM_TIMESTAMP_FORMAT: &str = "%m-%d-%Y %I:%M:%S %p";

/// Layout used when showing parsed timestamps.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a Zoom report timestamp. Returns `None` for empty or malformed input.
pub fn parse_zoom_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(trimmed, ZOOM_TIMESTAMP_FORMAT) {
        Ok(dt) => Some(dt),
        Err(e) => {
            debug!("could not parse Zoom timestamp \"{}\": {}", trimmed, e);
            None
        }
    }
}

/// Parse a start/end pair; both must parse or neither is returned.
pub fn parse_timestamp_pair(
    start: Option<&str>,
    end: Option<&str>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = parse_zoom_timestamp(start?)?;
    let end = parse_zoom_timestamp(end?)?;
    Some((start, end))
}

pub fn format_display_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// Wall-clock minutes between two timestamps (negative if `end` precedes `start`).
pub fn span_minutes(start: &NaiveDateTime, end: &NaiveDateTime) -> f64 {
    (*end - *start).num_seconds() as f64 / 60.0
}
