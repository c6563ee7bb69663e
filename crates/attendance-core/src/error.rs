use std::path::PathBuf;
use thiserror::Error;

/// Column names a participant table must carry, quoted in parse-failure hints.
pub const EXPECTED_COLUMNS_HINT: &str =
    "expected columns 'Name (original name)', 'Email', 'Total duration (minutes)'";

/// All errors produced while loading, analysing or exporting a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report file is not valid UTF-8 text.
    #[error("File {0} is not valid UTF-8 text")]
    Decode(PathBuf),

    /// The participant table block could not be parsed as tabular text.
    #[error("Failed to parse participant table: {0} ({hint})", hint = EXPECTED_COLUMNS_HINT)]
    TableParse(String),

    /// A column required by the analysis is missing after renaming.
    #[error("Participant table is missing the '{0}' column ({hint})", hint = EXPECTED_COLUMNS_HINT)]
    MissingColumn(String),

    /// The cleaned report could not be written.
    #[error("Failed to write export {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be produced.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An action needed an analysed report but the last analysis failed.
    #[error("No analysed report available: {0}")]
    NoReport(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReportError {
    /// Whether this error belongs to the table-parse family that the user can
    /// fix by supplying a differently shaped file.
    pub fn is_table_failure(&self) -> bool {
        matches!(
            self,
            ReportError::TableParse(_) | ReportError::MissingColumn(_) | ReportError::Csv(_)
        )
    }
}

/// Convenience alias used throughout the attendance crates.
pub type Result<T> = std::result::Result<T, ReportError>;
