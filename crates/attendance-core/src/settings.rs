use clap::Parser;
use std::path::PathBuf;

use crate::classification::DEFAULT_THRESHOLD_PERCENT;

/// File name used when `--export` is given without a path.
pub const DEFAULT_EXPORT_FILE: &str = "zoom_attendance_analysis_custom.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyse a Zoom meeting participant report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zoom-attendance",
    about = "Analyse a Zoom meeting participant report",
    version
)]
pub struct Settings {
    /// Zoom participant report (CSV with the meeting block on top)
    pub file: PathBuf,

    /// Consider 'Full Attended' if duration is at least X% of the official/max meeting duration
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_PERCENT, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: u8,

    /// Presentation mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "text", "json"])]
    pub view: String,

    /// Write the analysed report as CSV; use --export=PATH to pick the file
    /// (defaults to zoom_attendance_analysis_custom.csv)
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_EXPORT_FILE
    )]
    pub export: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::try_load_from(["zoom-attendance", "report.csv"]).unwrap();

        assert_eq!(settings.file, PathBuf::from("report.csv"));
        assert_eq!(settings.threshold, 75);
        assert_eq!(settings.view, "dashboard");
        assert!(settings.export.is_none());
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_file_is_required() {
        assert!(Settings::try_load_from(["zoom-attendance"]).is_err());
    }

    #[test]
    fn test_settings_threshold_bounds() {
        let zero = Settings::try_load_from(["zoom-attendance", "r.csv", "--threshold", "0"]).unwrap();
        assert_eq!(zero.threshold, 0);

        let full =
            Settings::try_load_from(["zoom-attendance", "r.csv", "--threshold", "100"]).unwrap();
        assert_eq!(full.threshold, 100);

        assert!(Settings::try_load_from(["zoom-attendance", "r.csv", "--threshold", "101"]).is_err());
        assert!(Settings::try_load_from(["zoom-attendance", "r.csv", "--threshold", "-1"]).is_err());
    }

    #[test]
    fn test_settings_bare_export_uses_default_name() {
        let settings =
            Settings::try_load_from(["zoom-attendance", "r.csv", "--export"]).unwrap();
        assert_eq!(settings.export, Some(PathBuf::from(DEFAULT_EXPORT_FILE)));
    }

    #[test]
    fn test_settings_export_with_path() {
        let settings =
            Settings::try_load_from(["zoom-attendance", "r.csv", "--export=/tmp/out.csv"]).unwrap();
        assert_eq!(settings.file, PathBuf::from("r.csv"));
        assert_eq!(settings.export, Some(PathBuf::from("/tmp/out.csv")));
    }

    #[test]
    fn test_settings_bare_export_before_file_keeps_file() {
        let settings =
            Settings::try_load_from(["zoom-attendance", "--export", "report.csv"]).unwrap();
        assert_eq!(settings.file, PathBuf::from("report.csv"));
        assert_eq!(settings.export, Some(PathBuf::from(DEFAULT_EXPORT_FILE)));
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        assert!(Settings::try_load_from(["zoom-attendance", "r.csv", "--view", "pie"]).is_err());
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings =
            Settings::try_load_from(["zoom-attendance", "r.csv", "--debug"]).unwrap();
        assert_eq!(settings.log_level, "DEBUG");
    }
}
