//! Main application state and TUI event loop for the attendance dashboard.
//!
//! [`App`] owns the theme, the active view, the report text and the latest
//! analysis.  Threshold changes re-run the analysis on the text already in
//! memory; `r` re-reads the file from disk.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{info, warn};

use attendance_core::error::{ReportError, Result};
use attendance_data::analysis::{analyze_report, AttendanceReport};
use attendance_data::export::export_to_path;
use attendance_data::reader::read_report_file;

use crate::overview_view;
use crate::table_view;
use crate::themes::Theme;

/// Coarse threshold step for `+`/`-` and the arrow keys.
pub const THRESHOLD_STEP: u8 = 5;
/// Fine threshold step for `.` and `,`.
pub const THRESHOLD_FINE_STEP: u8 = 1;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Meeting overview, status metrics and the duration histogram.
    Overview,
    /// Raw preview and the deduplicated participant table.
    Participants,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::Overview => ViewMode::Participants,
            ViewMode::Participants => ViewMode::Overview,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Dashboard state.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Report file shown in the dashboard; `r` re-reads it.
    pub source: PathBuf,
    /// Where `e` writes the CSV export.
    pub export_path: PathBuf,
    pub threshold_percent: u8,
    /// First participant row shown in the details table.
    pub scroll: usize,
    /// Latest analysis, or the message of the error that prevented it.
    pub report: std::result::Result<AttendanceReport, String>,
    /// One-line feedback for the last action (export, reload).
    pub status_message: Option<String>,
    pub should_quit: bool,
    raw: Option<String>,
}

impl App {
    /// Construct the dashboard around report text that was already read.
    pub fn new(
        theme_name: &str,
        source: PathBuf,
        raw: String,
        threshold_percent: u8,
        export_path: PathBuf,
    ) -> Self {
        let mut app = Self::empty(theme_name, source, threshold_percent, export_path);
        app.raw = Some(raw);
        app.reanalyze();
        app
    }

    /// Construct the dashboard from a file, keeping read failures on screen.
    pub fn from_file(
        theme_name: &str,
        source: PathBuf,
        threshold_percent: u8,
        export_path: PathBuf,
    ) -> Self {
        let mut app = Self::empty(theme_name, source, threshold_percent, export_path);
        app.reload();
        app
    }

    fn empty(theme_name: &str, source: PathBuf, threshold_percent: u8, export_path: PathBuf) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode: ViewMode::Overview,
            source,
            export_path,
            threshold_percent: threshold_percent.min(100),
            scroll: 0,
            report: Err("no report loaded".to_string()),
            status_message: None,
            should_quit: false,
            raw: None,
        }
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Re-run the analysis over the text in memory.
    pub fn reanalyze(&mut self) {
        let Some(raw) = self.raw.as_deref() else {
            return;
        };
        self.report = analyze_report(raw, self.threshold_percent).map_err(|e| {
            warn!("Analysis failed: {}", e);
            e.to_string()
        });
        if let Ok(report) = &self.report {
            self.scroll = self
                .scroll
                .min(report.summary.participants.len().saturating_sub(1));
        }
    }

    /// Re-read the source file and analyse it again.
    pub fn reload(&mut self) {
        match read_report_file(&self.source) {
            Ok(raw) => {
                info!("Reloaded {}", self.source.display());
                self.raw = Some(raw);
                self.reanalyze();
                self.status_message = Some(format!("Reloaded {}", self.source.display()));
            }
            Err(e) => {
                warn!("Reload failed: {}", e);
                self.raw = None;
                self.report = Err(e.to_string());
                self.status_message = None;
            }
        }
    }

    /// Move the threshold by `delta`, clamped to 0–100, and re-classify.
    pub fn adjust_threshold(&mut self, delta: i16) {
        let next = (self.threshold_percent as i16 + delta).clamp(0, 100) as u8;
        if next != self.threshold_percent {
            self.threshold_percent = next;
            self.reanalyze();
        }
    }

    /// Write the deduplicated rows to [`App::export_path`].
    pub fn export(&self) -> Result<usize> {
        let report = self
            .report
            .as_ref()
            .map_err(|e| ReportError::NoReport(e.clone()))?;
        let rows = report.export_rows();
        export_to_path(&rows, &self.export_path)?;
        Ok(rows.len())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.view_mode = self.view_mode.next(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                self.adjust_threshold(THRESHOLD_STEP as i16)
            }
            KeyCode::Char('-') | KeyCode::Left => self.adjust_threshold(-(THRESHOLD_STEP as i16)),
            KeyCode::Char('.') => self.adjust_threshold(THRESHOLD_FINE_STEP as i16),
            KeyCode::Char(',') => self.adjust_threshold(-(THRESHOLD_FINE_STEP as i16)),
            KeyCode::Down | KeyCode::Char('j') => {
                if let Ok(report) = &self.report {
                    let last = report.summary.participants.len().saturating_sub(1);
                    self.scroll = (self.scroll + 1).min(last);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.status_message = Some(match self.export() {
                    Ok(n) => format!("Exported {} rows to {}", n, self.export_path.display()),
                    Err(e) => {
                        warn!("Export failed: {}", e);
                        format!("Export failed: {}", e)
                    }
                });
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            _ => {}
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the terminal is
    /// restored even when drawing fails.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let message = self.status_message.as_deref();

        match &self.report {
            Err(e) => overview_view::render_error(frame, area, e, &self.theme),
            Ok(report) => match self.view_mode {
                ViewMode::Overview => {
                    overview_view::render_overview(frame, area, report, message, &self.theme)
                }
                ViewMode::Participants => table_view::render_participants_view(
                    frame,
                    area,
                    report,
                    self.scroll,
                    message,
                    &self.theme,
                ),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
