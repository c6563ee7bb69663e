//! Overview screen for the attendance dashboard.
//!
//! Everything is built as plain [`Line`]s first so the same content can be
//! rendered into a [`Paragraph`] or flattened into text for `--view text`.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use attendance_core::formatting::{format_minutes, format_number};
use attendance_core::models::{AttendanceStatus, MeetingMetadata};
use attendance_core::time_utils::{format_display_timestamp, span_minutes};
use attendance_data::analysis::AttendanceReport;

use crate::components::header::Header;
use crate::components::status_bar::{DistributionBar, HistogramBar, StatusShareBar};
use crate::themes::Theme;

/// Key bindings shown at the bottom of the dashboard.
pub const HELP_LINE: &str =
    "+/- threshold ±5 | ./, ±1 | Tab switch view | e export | r reload | q quit";

/// Pad a label to a fixed column so values line up.
fn pad_label(label: &str) -> String {
    format!("{:<34}", format!("{}:", label))
}

fn field_line<'a>(label: &str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(pad_label(label), theme.label),
        Span::styled(value, theme.value),
    ])
}

fn section_title<'a>(title: &str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(title.to_string(), theme.header))
}

// ── Section builders ──────────────────────────────────────────────────────────

/// Topic, ID, host, official duration and the parsed meeting times.
pub fn meeting_overview_lines<'a>(report: &AttendanceReport, theme: &Theme) -> Vec<Line<'a>> {
    let metadata = &report.metadata;
    let mut lines = vec![section_title("📅 Meeting Overview", theme)];

    lines.push(field_line(
        "Topic",
        metadata.display_value(MeetingMetadata::TOPIC).to_string(),
        theme,
    ));
    lines.push(field_line(
        "Meeting ID",
        metadata.display_value(MeetingMetadata::ID).to_string(),
        theme,
    ));
    lines.push(field_line(
        "Host",
        metadata.display_value(MeetingMetadata::HOST).to_string(),
        theme,
    ));

    let official = match metadata.official_duration() {
        Some(minutes) => format!("{} minutes", format_number(minutes, 0)),
        None => metadata.display_value(MeetingMetadata::DURATION).to_string(),
    };
    lines.push(field_line("Official Duration", official, theme));

    let start = report
        .start_time
        .as_ref()
        .map(format_display_timestamp)
        .unwrap_or_else(|| metadata.display_value(MeetingMetadata::START_TIME).to_string());
    let end = report
        .end_time
        .as_ref()
        .map(format_display_timestamp)
        .unwrap_or_else(|| metadata.display_value(MeetingMetadata::END_TIME).to_string());
    lines.push(field_line("Start Time", start, theme));
    lines.push(field_line("End Time", end, theme));

    if let (Some(start), Some(end)) = (report.start_time.as_ref(), report.end_time.as_ref()) {
        lines.push(field_line(
            "Wall-clock Span",
            format_minutes(span_minutes(start, end).max(0.0)),
            theme,
        ));
    }

    let source = if report.uses_official_duration() {
        "official"
    } else {
        "longest participant"
    };
    lines.push(field_line(
        "Reference Duration",
        format!("{} min ({})", format_number(report.reference_minutes, 2), source),
        theme,
    ));

    lines
}

/// One line per warning, or nothing when the report is clean.
pub fn warning_lines<'a>(report: &AttendanceReport, theme: &Theme) -> Vec<Line<'a>> {
    report
        .warnings
        .iter()
        .map(|w| Line::from(Span::styled(format!("⚠  {}", w), theme.warning)))
        .collect()
}

/// Participant totals, per-status metrics and the distribution bars.
pub fn summary_lines<'a>(report: &AttendanceReport, theme: &'a Theme) -> Vec<Line<'a>> {
    let summary = &report.summary;
    let counts = &summary.status_counts;
    let mut lines = vec![section_title("📊 Attendance Overview", theme)];

    lines.push(field_line(
        "Total Unique Participants",
        summary.total_unique.to_string(),
        theme,
    ));
    lines.push(field_line(
        "Identified By",
        summary.identity_key.column().to_string(),
        theme,
    ));

    for (status, count) in counts.non_zero() {
        let label = match status {
            AttendanceStatus::DidNotAttend => {
                "Did Not Attend Participants (0 min)".to_string()
            }
            other => format!("{} Participants", other.label()),
        };
        lines.push(Line::from(vec![
            Span::styled(pad_label(&label), theme.label),
            Span::styled(count.to_string(), theme.status_style(status)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section_title("Status Distribution", theme));
    lines.push(DistributionBar::new(counts.non_zero(), theme).to_line());
    for (status, count) in counts.non_zero() {
        lines.push(StatusShareBar::new(status, count, counts.total(), theme).to_line());
    }

    lines
}

/// Histogram of deduplicated durations plus mean and median.
pub fn duration_lines<'a>(report: &AttendanceReport, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = vec![section_title("⏱️  Duration Distribution", theme)];

    if report.histogram.is_empty() {
        lines.push(Line::from(Span::styled("No participants", theme.dim)));
    } else {
        let max_count = report.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        for bin in &report.histogram {
            lines.push(HistogramBar::new(bin.label(), bin.count, max_count, theme).to_line());
        }
    }

    lines.push(Line::from(""));
    lines.push(field_line(
        "Average Duration per Participant",
        format!("{} minutes", format_number(report.summary.mean_duration, 2)),
        theme,
    ));
    lines.push(field_line(
        "Median Duration per Participant",
        format!("{} minutes", format_number(report.summary.median_duration, 2)),
        theme,
    ));

    lines
}

/// Flatten styled lines into plain text, one line per row.
pub fn plain_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Main render ───────────────────────────────────────────────────────────────

/// Render the overview screen into `area`.
///
/// Layout: header on top, meeting details and status metrics on the left,
/// duration histogram on the right, warnings and key help at the bottom.
pub fn render_overview(
    frame: &mut Frame,
    area: Rect,
    report: &AttendanceReport,
    status_message: Option<&str>,
    theme: &Theme,
) {
    let warnings = warning_lines(report, theme);
    let footer_height = warnings.len() as u16 + 3;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(footer_height),
        ])
        .split(area);

    let topic = report.metadata.display_value(MeetingMetadata::TOPIC);
    let header = Header::new(topic, report.threshold_percent, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let mut left = meeting_overview_lines(report, theme);
    left.push(Line::from(""));
    left.extend(summary_lines(report, theme));
    frame.render_widget(
        Paragraph::new(Text::from(left))
            .block(Block::default().borders(Borders::ALL).style(theme.table_border))
            .style(theme.text),
        columns[0],
    );

    frame.render_widget(
        Paragraph::new(Text::from(duration_lines(report, theme)))
            .block(Block::default().borders(Borders::ALL).style(theme.table_border))
            .style(theme.text),
        columns[1],
    );

    let mut footer = warnings;
    if let Some(message) = status_message {
        footer.push(Line::from(Span::styled(message.to_string(), theme.info)));
    }
    footer.push(Line::from(Span::styled(HELP_LINE, theme.dim)));
    frame.render_widget(
        Paragraph::new(Text::from(footer))
            .block(Block::default().borders(Borders::TOP).style(theme.separator))
            .wrap(Wrap { trim: true }),
        rows[2],
    );
}

/// Render a failure screen when the report could not be analysed.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Could not analyse the report", theme.error)),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'r' to reload the file, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Zoom Attendance "),
            ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
