//! Plain-text rendering for `--view text`.

use attendance_data::analysis::AttendanceReport;
use attendance_ui::overview_view::{
    duration_lines, meeting_overview_lines, plain_text, summary_lines, warning_lines,
};
use attendance_ui::table_view::participants_text;
use attendance_ui::themes::Theme;

/// The whole report as text: overview, warnings, metrics, histogram and the
/// participant table.
pub fn render_text(report: &AttendanceReport) -> String {
    let theme = Theme::classic();
    let mut sections = vec![plain_text(&meeting_overview_lines(report, &theme))];

    let warnings = warning_lines(report, &theme);
    if !warnings.is_empty() {
        sections.push(plain_text(&warnings));
    }

    sections.push(plain_text(&summary_lines(report, &theme)));
    sections.push(plain_text(&duration_lines(report, &theme)));
    sections.push(format!(
        "Individual Participant Details\n{}",
        participants_text(&report.summary)
    ));

    sections.join("\n\n")
}
