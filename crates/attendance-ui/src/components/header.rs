use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Meeting topic and threshold in `[ topic | threshold 75% ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Meeting topic, or `"N/A"` when the report carried no metadata.
    pub topic: &'a str,
    /// Full-attendance threshold in percent.
    pub threshold_percent: u8,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(topic: &'a str, threshold_percent: u8, theme: &'a Theme) -> Self {
        Self {
            topic,
            threshold_percent,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" ZOOM ATTENDANCE ANALYZER ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.topic.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("threshold {}%", self.threshold_percent),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new("Weekly Sync", 75, &theme).to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new("Weekly Sync", 75, &theme).to_lines();
        let title = text_of(&lines[0]);
        assert!(title.contains("ZOOM ATTENDANCE ANALYZER"), "got: {title}");
        assert!(title.contains(SPARKLES), "got: {title}");
    }

    #[test]
    fn test_header_info_line_keeps_topic_case() {
        let theme = Theme::dark();
        let lines = Header::new("Weekly Sync", 80, &theme).to_lines();
        let info = text_of(&lines[2]);
        assert_eq!(info, "[ Weekly Sync | threshold 80% ]");
        assert_eq!(lines[2].spans.len(), 5);
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new("N/A", 75, &theme).to_lines();
        let sep = text_of(&lines[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
        assert!(text_of(&lines[3]).is_empty());
    }
}
