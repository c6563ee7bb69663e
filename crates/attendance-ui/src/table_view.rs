//! Participant tables for the attendance dashboard.
//!
//! Renders the raw five-row preview and the deduplicated participant
//! details as bordered [`ratatui::widgets::Table`]s, with a highlighted
//! totals row under the details.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use attendance_core::formatting;
use attendance_core::models::ClassifiedParticipant;
use attendance_data::aggregator::AttendanceSummary;
use attendance_data::analysis::{AttendanceReport, PREVIEW_ROWS};
use attendance_data::export::EXPORT_HEADERS;

use crate::themes::Theme;

/// Display width reserved for the name column.
const NAME_WIDTH: usize = 28;
/// Display width reserved for the e-mail column.
const EMAIL_WIDTH: usize = 32;

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn detail_row<'a>(p: &ClassifiedParticipant, theme: &Theme, alternate: bool) -> Row<'a> {
    let style = if alternate {
        theme.table_row_alt
    } else {
        theme.table_row
    };
    Row::new(vec![
        Cell::from(truncate_to_width(&p.record.name, NAME_WIDTH)),
        Cell::from(truncate_to_width(&p.record.user_email, EMAIL_WIDTH)),
        Cell::from(formatting::format_number(p.record.duration_minutes, 2)),
        Cell::from(formatting::format_percent(p.attendance_percent)),
        Cell::from(p.status.as_str()).style(theme.status_style(p.status)),
    ])
    .style(style)
}

/// Render the deduplicated participant table, starting at row `offset`.
pub fn render_participants(
    frame: &mut Frame,
    area: Rect,
    summary: &AttendanceSummary,
    offset: usize,
    theme: &Theme,
) {
    let header = Row::new(
        EXPORT_HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let start = offset.min(summary.participants.len());
    let mut rows: Vec<Row> = summary.participants[start..]
        .iter()
        .enumerate()
        .map(|(i, p)| detail_row(p, theme, (start + i) % 2 == 1))
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("TOTAL").style(theme.table_total),
            Cell::from(format!("{} participants", summary.total_unique)),
            Cell::from(formatting::format_number(summary.mean_duration, 2)),
            Cell::from("mean"),
            Cell::from(""),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(NAME_WIDTH as u16 + 2),
        Constraint::Length(EMAIL_WIDTH as u16 + 2),
        Constraint::Length(16),
        Constraint::Length(18),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Individual Participant Details "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the first loaded rows with every column as read from the file.
pub fn render_preview(frame: &mut Frame, area: Rect, report: &AttendanceReport, theme: &Theme) {
    let columns = &report.table.columns;
    let header = Row::new(
        columns
            .iter()
            .map(|h| Cell::from(h.clone()).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = report
        .preview()
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(
                cells
                    .into_iter()
                    .map(|c| Cell::from(truncate_to_width(&c, NAME_WIDTH))),
            )
            .style(style)
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|_| Constraint::Min(10)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Raw Participant Data Preview (first {}) ", PREVIEW_ROWS)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Preview on top, participant details below, help line at the bottom.
pub fn render_participants_view(
    frame: &mut Frame,
    area: Rect,
    report: &AttendanceReport,
    offset: usize,
    status_message: Option<&str>,
    theme: &Theme,
) {
    let preview_height = report.preview().len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(preview_height),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(area);

    render_preview(frame, chunks[0], report, theme);

    if report.summary.participants.is_empty() {
        render_no_data(frame, chunks[1], theme);
    } else {
        render_participants(frame, chunks[1], &report.summary, offset, theme);
    }

    let mut footer = Vec::new();
    if let Some(message) = status_message {
        footer.push(Line::from(Span::styled(message.to_string(), theme.info)));
    }
    footer.push(Line::from(Span::styled(
        "↑/↓ scroll | Tab switch view | e export | q quit",
        theme.dim,
    )));
    frame.render_widget(Paragraph::new(Text::from(footer)), chunks[2]);
}

/// Render a "no data" placeholder when the report has no participant rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No participant rows found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "The participant table has a header but no data rows.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Individual Participant Details "),
        ),
        area,
    );
}

/// Fixed-width text rendering of the participant details for `--view text`.
pub fn participants_text(summary: &AttendanceSummary) -> String {
    let mut out = format!(
        "{:<w1$}  {:<w2$}  {:>15}  {:>17}  {}\n",
        EXPORT_HEADERS[0],
        EXPORT_HEADERS[1],
        EXPORT_HEADERS[2],
        EXPORT_HEADERS[3],
        EXPORT_HEADERS[4],
        w1 = NAME_WIDTH,
        w2 = EMAIL_WIDTH,
    );
    for p in &summary.participants {
        let name = truncate_to_width(&p.record.name, NAME_WIDTH);
        let email = truncate_to_width(&p.record.user_email, EMAIL_WIDTH);
        out.push_str(&format!(
            "{}{}  {}{}  {:>15}  {:>17}  {}\n",
            name,
            " ".repeat(NAME_WIDTH.saturating_sub(name.width())),
            email,
            " ".repeat(EMAIL_WIDTH.saturating_sub(email.width())),
            formatting::format_number(p.record.duration_minutes, 2),
            formatting::format_percent(p.attendance_percent),
            p.status.as_str(),
        ));
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_data::analysis::analyze_report;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    const REPORT: &str = "Topic,ID,Host,Duration (minutes),Start time,End time\n\
        Weekly Sync,123,Alice,60,01-01-2024 09:00:00 AM,01-01-2024 10:00:00 AM\n\
        \n\
        Name (original name),Email,Total duration (minutes),Guest\n\
        Bob,bob@x.com,45,No\n\
        Bob,bob@x.com,10,No\n\
        Dan,dan@x.com,30,No\n\
        Carol,carol@x.com,0,Yes\n";

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters count as two columns.
        let cut = truncate_to_width("日本語テキスト", 6);
        assert!(cut.width() <= 6, "got {cut}");
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_render_participants_shows_rows_and_total() {
        let theme = Theme::dark();
        let report = analyze_report(REPORT, 75).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(130, 12)).unwrap();
        terminal
            .draw(|f| render_participants(f, f.area(), &report.summary, 0, &theme))
            .unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Individual Participant Details"));
        assert!(content.contains("bob@x.com"));
        assert!(content.contains("FullAttended"));
        assert!(content.contains("PartialAttended"));
        assert!(content.contains("DidNotAttend"));
        assert!(content.contains("3 participants"));
    }

    #[test]
    fn test_render_participants_offset_skips_rows() {
        let theme = Theme::dark();
        let report = analyze_report(REPORT, 75).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(130, 12)).unwrap();
        terminal
            .draw(|f| render_participants(f, f.area(), &report.summary, 1, &theme))
            .unwrap();
        let content = buffer_text(&terminal);
        assert!(!content.contains("bob@x.com"));
        assert!(content.contains("dan@x.com"));
    }

    #[test]
    fn test_render_preview_keeps_extra_columns_and_duplicates() {
        let theme = Theme::dark();
        let report = analyze_report(REPORT, 75).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(130, 10)).unwrap();
        terminal
            .draw(|f| render_preview(f, f.area(), &report, &theme))
            .unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Raw Participant Data Preview"));
        assert!(content.contains("Guest"));
        assert_eq!(content.matches("bob@x.com").count(), 2);
    }

    #[test]
    fn test_render_participants_view_empty_table() {
        let theme = Theme::dark();
        let raw = "Name (original name),Email,Total duration (minutes)\n";
        let report = analyze_report(raw, 75).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| render_participants_view(f, f.area(), &report, 0, None, &theme))
            .unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("No participant rows found"));
    }

    #[test]
    fn test_participants_text_has_header_and_rows() {
        let report = analyze_report(REPORT, 75).unwrap();
        let text = participants_text(&report.summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[0].contains("AttendanceStatus"));
        assert!(lines[1].contains("bob@x.com") && lines[1].contains("75.00%"));
        assert!(lines[3].ends_with("DidNotAttend"));
    }
}
