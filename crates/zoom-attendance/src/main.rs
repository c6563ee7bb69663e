mod bootstrap;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use attendance_core::error::ReportError;
use attendance_core::settings::{Settings, DEFAULT_EXPORT_FILE};
use attendance_data::analysis::analyze_report;
use attendance_data::export::{export_to_path, report_to_json};
use attendance_data::reader::read_report_file;
use attendance_ui::app::App;

fn main() -> ExitCode {
    let settings = Settings::load();

    let dashboard = settings.view == "dashboard";
    if let Err(e) =
        bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref(), dashboard)
    {
        eprintln!("Warning: {e:#}");
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {e:#}");
            let table_failure = e
                .downcast_ref::<ReportError>()
                .is_some_and(ReportError::is_table_failure);
            if table_failure {
                eprintln!(
                    "Common issues: file encoding, unexpected line breaks, or column names \
                     other than 'Name (original name)', 'Email', 'Total duration (minutes)'."
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<()> {
    tracing::info!("Zoom Attendance v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, View: {}, Threshold: {}%, Theme: {}",
        settings.file.display(),
        settings.view,
        settings.threshold,
        settings.theme
    );

    match settings.view.as_str() {
        "dashboard" => {
            let export_path = settings
                .export
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            let app = App::from_file(
                &settings.theme,
                settings.file.clone(),
                settings.threshold,
                export_path,
            );
            app.run().map_err(|e| ReportError::Terminal(e.to_string()))?;
        }

        "text" | "json" => {
            let raw = read_report_file(&settings.file)?;
            let report = analyze_report(&raw, settings.threshold)?;

            if settings.view == "json" {
                println!("{}", report_to_json(&report)?);
            } else {
                println!("{}", output::render_text(&report));
            }

            if let Some(path) = &settings.export {
                let rows = report.export_rows();
                export_to_path(&rows, path)?;
                eprintln!("Exported {} rows to {}", rows.len(), path.display());
            }
        }

        unknown => {
            anyhow::bail!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
