use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map `WARNING`-style level names to `tracing` directives (lowercase).
///
/// Unknown names pass through unchanged so `EnvFilter` directives such as
/// `attendance_data=trace` still work.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Build the filter for `log_level`, falling back to `"warn"` when the
/// directive does not parse.
pub fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Where log events end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Appended to the `--log-file` path without ANSI colours.
    File,
    Stderr,
    /// Dropped. Stderr shares the terminal with the dashboard's alternate
    /// screen, and report warnings are already shown in the overview.
    Discard,
}

/// Pick the log destination for a run.
pub fn log_target(log_file: Option<&Path>, dashboard: bool) -> LogTarget {
    match (log_file, dashboard) {
        (Some(_), _) => LogTarget::File,
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, events are appended to that file without ANSI
/// colours. Otherwise they go to stderr, except in the dashboard, where
/// nothing is written.
pub fn setup_logging(
    log_level: &str,
    log_file: Option<&Path>,
    dashboard: bool,
) -> anyhow::Result<()> {
    let filter = build_filter(log_level);

    let (file_layer, stderr_layer) = match (log_target(log_file, dashboard), log_file) {
        (LogTarget::File, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        (LogTarget::Stderr, _) => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            (None, Some(layer))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
