use crate::themes::Theme;
use attendance_core::models::AttendanceStatus;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a bar.
pub struct BarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// Fill `width` columns proportionally to `value / max`.
fn filled_columns(value: f64, max: f64, width: u16) -> u16 {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let ratio = (value / max).min(1.0);
    ((ratio * width as f64).round() as u16).clamp(1, width)
}

// ── StatusShareBar ───────────────────────────────────────────────────────────

/// Horizontal bar showing how many participants fall into one status.
///
/// Renders as a padded label, a coloured fill and a `count (share%)` suffix.
pub struct StatusShareBar<'a> {
    pub status: AttendanceStatus,
    pub count: usize,
    pub total: usize,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> StatusShareBar<'a> {
    pub fn new(status: AttendanceStatus, count: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            status,
            count,
            total,
            theme,
            config: BarConfig::default(),
        }
    }

    /// Share of the total in percent, `0.0` when the total is zero.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64 * 100.0
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let filled = filled_columns(self.count as f64, self.total as f64, self.config.width);
        let empty = self.config.width.saturating_sub(filled);

        let filled_str =
            self.config.filled_char.to_string().repeat(filled as usize);
        let empty_str =
            self.config.empty_char.to_string().repeat(empty as usize);

        Line::from(vec![
            Span::styled(format!("{:<18}", self.status.label()), self.theme.label),
            Span::styled(filled_str, self.theme.status_style(self.status)),
            Span::styled(empty_str, self.theme.bar_empty),
            Span::styled(
                format!(" {} ({:.1}%)", self.count, self.percentage()),
                self.theme.value,
            ),
        ])
    }
}

// ── DistributionBar ──────────────────────────────────────────────────────────

/// A proportional multi-coloured bar splitting participants by status.
///
/// Each status with a non-zero count is a contiguous segment whose width is
/// proportional to its share; labels follow the bar.
pub struct DistributionBar<'a> {
    /// `(status, count)` pairs; zero counts are skipped.
    pub counts: Vec<(AttendanceStatus, usize)>,
    pub theme: &'a Theme,
    pub width: u16,
}

impl<'a> DistributionBar<'a> {
    pub fn new(counts: Vec<(AttendanceStatus, usize)>, theme: &'a Theme) -> Self {
        Self {
            counts,
            theme,
            width: 40,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let total: usize = self.counts.iter().map(|(_, c)| c).sum();
        let mut spans: Vec<Span<'a>> = Vec::new();

        if total == 0 {
            spans.push(Span::styled(
                "░".repeat(self.width as usize),
                self.theme.bar_empty,
            ));
            return Line::from(spans);
        }

        for (status, count) in &self.counts {
            let chars = ((*count as f64 / total as f64) * self.width as f64).round() as usize;
            if chars > 0 {
                spans.push(Span::styled("█".repeat(chars), self.theme.status_style(*status)));
            }
        }

        spans.push(Span::raw(" "));

        for (status, count) in &self.counts {
            if *count > 0 {
                spans.push(Span::styled(
                    format!(
                        "{} {:.1}% ",
                        status.as_str(),
                        *count as f64 / total as f64 * 100.0
                    ),
                    self.theme.status_style(*status),
                ));
            }
        }

        Line::from(spans)
    }
}

// ── HistogramBar ─────────────────────────────────────────────────────────────

/// One histogram bucket drawn as a horizontal bar scaled to the tallest bucket.
pub struct HistogramBar<'a> {
    pub label: String,
    pub count: usize,
    pub max_count: usize,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> HistogramBar<'a> {
    pub fn new(label: String, count: usize, max_count: usize, theme: &'a Theme) -> Self {
        Self {
            label,
            count,
            max_count,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let filled = filled_columns(self.count as f64, self.max_count as f64, self.config.width);
        let filled_str =
            self.config.filled_char.to_string().repeat(filled as usize);

        Line::from(vec![
            Span::styled(format!("{:>11} ", self.label), self.theme.label),
            Span::styled(filled_str, self.theme.histogram_bar),
            Span::styled(format!(" {}", self.count), self.theme.dim),
        ])
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
    fn test_share_bar_width_matches_config() {
        let theme = Theme::dark();
        let bar = StatusShareBar::new(AttendanceStatus::FullAttended, 1, 4, &theme);
        let line = bar.to_line();
        let filled = line.spans[1].content.chars().count();
        let empty = line.spans[2].content.chars().count();
        assert_eq!(filled + empty, 40);
        assert_eq!(filled, 10);
        assert!(text_of(&line).ends_with(" 1 (25.0%)"));
    }

    #[test]
    fn test_share_bar_zero_total() {
        let theme = Theme::dark();
        let bar = StatusShareBar::new(AttendanceStatus::DidNotAttend, 0, 0, &theme);
        assert_eq!(bar.percentage(), 0.0);
        let line = bar.to_line();
        assert!(line.spans[1].content.is_empty());
        assert_eq!(line.spans[2].content.chars().count(), 40);
    }

    #[test]
    fn test_small_share_still_visible() {
        assert_eq!(filled_columns(1.0, 1000.0, 40), 1);
        assert_eq!(filled_columns(0.0, 1000.0, 40), 0);
        assert_eq!(filled_columns(5.0, 5.0, 40), 40);
    }

    #[test]
    fn test_distribution_bar_labels_skip_zero_counts() {
        let theme = Theme::dark();
        let bar = DistributionBar::new(
            vec![
                (AttendanceStatus::FullAttended, 1),
                (AttendanceStatus::PartialAttended, 0),
                (AttendanceStatus::DidNotAttend, 1),
            ],
            &theme,
        );
        let text = text_of(&bar.to_line());
        assert!(text.contains("FullAttended 50.0%"), "got: {text}");
        assert!(text.contains("DidNotAttend 50.0%"), "got: {text}");
        assert!(!text.contains("PartialAttended"), "got: {text}");
    }

    #[test]
    fn test_distribution_bar_empty() {
        let theme = Theme::dark();
        let bar = DistributionBar::new(Vec::new(), &theme);
        let text = text_of(&bar.to_line());
        assert_eq!(text.chars().count(), 40);
        assert!(text.chars().all(|c| c == '░'));
    }

    #[test]
    fn test_histogram_bar_scales_to_max() {
        let theme = Theme::dark();
        let line = HistogramBar::new("0-3".into(), 2, 4, &theme).to_line();
        assert_eq!(line.spans[1].content.chars().count(), 20);
        assert!(text_of(&line).ends_with(" 2"));
    }
}
