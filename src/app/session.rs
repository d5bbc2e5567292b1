// LogSheet - app/session.rs
//
// The two user actions, load and export, run synchronously against the
// session's `AppState`.
//
// - Load reads the file, parses it and replaces the held table. A failed
//   load leaves the previous table in place.
// - Export borrows the held table, runs the pipeline, renders the whole
//   output in memory and only then writes it (atomically). A failed export
//   never touches the held table and never leaves a partial file.
// - Every error is logged, stored as the status message, and returned once.
//   Nothing is retried.

use crate::app::settings::ExportSettings;
use crate::app::state::AppState;
use crate::core::export::{self, ExportFormat};
use crate::core::model::Stage;
use crate::core::{parser, pipeline};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, LogSheetError, ParseError, Result};
use std::path::{Path, PathBuf};

/// Coarse progress report emitted at stage boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Completion, 0-100.
    pub percent: u8,
    pub stage: Stage,
}

impl Progress {
    fn at(stage: Stage) -> Self {
        let percent = match stage {
            Stage::Read => constants::PROGRESS_LOAD_READ,
            Stage::Parsed => constants::PROGRESS_LOAD_DONE,
            Stage::Filtered => constants::PROGRESS_EXPORT_FILTERED,
            Stage::Derived => constants::PROGRESS_EXPORT_DERIVED,
            Stage::Assembled => constants::PROGRESS_EXPORT_ASSEMBLED,
            Stage::Rendered => constants::PROGRESS_EXPORT_RENDERED,
            Stage::Written => constants::PROGRESS_EXPORT_DONE,
        };
        Self { percent, stage }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub rows: usize,
    pub columns: usize,
    /// Rows fitted to the header width (padded or truncated).
    pub ragged_rows: usize,
    pub marker_line: usize,
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Detail rows written (the summary row is not counted).
    pub rows: usize,
    pub columns: usize,
}

/// Single-owner holder of the application state.
#[derive(Debug, Default)]
pub struct Session {
    state: AppState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Load `path` and replace the held table on success.
    pub fn load<F>(&mut self, path: &Path, mut on_progress: F) -> Result<LoadSummary>
    where
        F: FnMut(Progress),
    {
        tracing::info!(path = %path.display(), "Loading log file");
        match self.try_load(path, &mut on_progress) {
            Ok(summary) => {
                self.state.status_message = format!(
                    "Loaded {} rows x {} columns from '{}'",
                    summary.rows,
                    summary.columns,
                    path.display()
                );
                tracing::info!(
                    rows = summary.rows,
                    columns = summary.columns,
                    ragged = summary.ragged_rows,
                    "Log file loaded"
                );
                Ok(summary)
            }
            Err(e) => Err(self.fail("Load failed", e)),
        }
    }

    fn try_load(
        &mut self,
        path: &Path,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<LoadSummary> {
        let content = fs::read_file_latin1(path).map_err(|e| ParseError::Io {
            file: path.to_path_buf(),
            source: e,
        })?;
        on_progress(Progress::at(Stage::Read));

        let parsed = parser::parse_content(&content)?;
        let warnings: Vec<String> = parsed
            .ragged_rows
            .iter()
            .map(|r| {
                format!(
                    "line {}: {} field(s), expected {}",
                    r.line_number, r.fields, r.expected
                )
            })
            .collect();

        let summary = LoadSummary {
            rows: parsed.table.row_count(),
            columns: parsed.table.column_count(),
            ragged_rows: parsed.ragged_total,
            marker_line: parsed.marker_line,
        };
        self.state
            .replace_table(parsed.table, path.to_path_buf(), warnings);
        on_progress(Progress::at(Stage::Parsed));
        Ok(summary)
    }

    /// Filter, summarise and write the held table to `dest`.
    ///
    /// `lower` and `upper` are the range bounds as typed by the user.
    pub fn export<F>(
        &mut self,
        settings: &ExportSettings,
        lower: &str,
        upper: &str,
        dest: &Path,
        mut on_progress: F,
    ) -> Result<ExportSummary>
    where
        F: FnMut(Progress),
    {
        tracing::info!(
            dest = %dest.display(),
            column = %settings.filter_column,
            lower,
            upper,
            "Exporting"
        );
        match self.try_export(settings, lower, upper, dest, &mut on_progress) {
            Ok(summary) => {
                self.state.last_export_path = Some(summary.path.clone());
                self.state.status_message = format!(
                    "Saved {} rows to '{}'",
                    summary.rows,
                    summary.path.display()
                );
                tracing::info!(
                    path = %summary.path.display(),
                    rows = summary.rows,
                    "Export complete"
                );
                Ok(summary)
            }
            Err(e) => Err(self.fail("Export failed", e)),
        }
    }

    fn try_export(
        &self,
        settings: &ExportSettings,
        lower: &str,
        upper: &str,
        dest: &Path,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<ExportSummary> {
        let table = self.state.table.as_ref().ok_or(LogSheetError::NoTableLoaded)?;
        let request = settings.request(lower, upper)?;

        let result = pipeline::run(table, &request, |stage| on_progress(Progress::at(stage)))?;

        let bytes = export::render(&result, settings.format, &settings.style, dest)?;
        on_progress(Progress::at(Stage::Rendered));

        fs::write_atomic(dest, &bytes).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        on_progress(Progress::at(Stage::Written));

        Ok(ExportSummary {
            path: dest.to_path_buf(),
            format: settings.format,
            rows: result.rows.len(),
            columns: result.columns.len(),
        })
    }

    /// Record a failed action in the status message and pass the error on.
    fn fail(&mut self, action: &str, error: LogSheetError) -> LogSheetError {
        tracing::error!(error = %error, "{action}");
        self.state.status_message = format!("{action}: {error}");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "Station 3\n***DATA***\n\
                       Time  (Sec)\tCell Current (A)\tCell Power(W)\n\
                       0\t1\t10\n\
                       10\t2\t14\n\
                       20\t3\t30\n";

    fn make_settings(format: ExportFormat) -> ExportSettings {
        ExportSettings {
            output_columns: vec![
                "Time  (Sec)".to_string(),
                "Time (Hour)".to_string(),
                "Cell Power(W)".to_string(),
            ],
            format,
            ..ExportSettings::default()
        }
    }

    fn loaded_session(dir: &Path) -> Session {
        let path = dir.join("run.txt");
        std::fs::write(&path, LOG).unwrap();
        let mut session = Session::new();
        session.load(&path, |_| {}).unwrap();
        session
    }

    #[test]
    fn test_load_reports_progress_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, LOG).unwrap();

        let mut session = Session::new();
        let mut seen = Vec::new();
        let summary = session.load(&path, |p| seen.push(p.percent)).unwrap();

        assert_eq!(seen, vec![50, 100]);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.columns, 3);
        assert_eq!(summary.marker_line, 2);
        assert!(session.state().status_message.starts_with("Loaded 3 rows"));
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = loaded_session(dir.path());

        let bad = dir.path().join("bad.txt");
        std::fs::write(&bad, "no marker here\n").unwrap();
        let err = session.load(&bad, |_| {}).unwrap_err();

        assert!(matches!(err, LogSheetError::Parse(ParseError::NoDataSection)));
        assert_eq!(session.state().table.as_ref().unwrap().row_count(), 3);
        assert!(session.state().status_message.contains("no data section found"));
    }

    #[test]
    fn test_export_without_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        let err = session
            .export(
                &make_settings(ExportFormat::Csv),
                "1",
                "2",
                &dir.path().join("out.csv"),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, LogSheetError::NoTableLoaded));
    }

    #[test]
    fn test_export_csv_progress_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = loaded_session(dir.path());
        let dest = dir.path().join("out.csv");

        let mut seen = Vec::new();
        let summary = session
            .export(&make_settings(ExportFormat::Csv), "1", "2", &dest, |p| {
                seen.push(p.percent)
            })
            .unwrap();

        assert_eq!(seen, vec![20, 40, 60, 80, 100]);
        assert_eq!(summary.rows, 2);
        assert_eq!(session.state().last_export_path.as_deref(), Some(dest.as_path()));

        let text = std::fs::read_to_string(&dest).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Time  (Sec),Time (Hour),Cell Power(W)");
        assert_eq!(lines[1], ",,12");
        assert_eq!(lines[2], "0,0,10");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_range_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = loaded_session(dir.path());
        let before = session.state().table.clone();
        let dest = dir.path().join("out.xlsx");

        let err = session
            .export(&make_settings(ExportFormat::Xlsx), "50", "60", &dest, |_| {})
            .unwrap_err();

        assert!(matches!(
            err,
            LogSheetError::Table(crate::util::error::TableError::EmptyResult { .. })
        ));
        assert!(!dest.exists());
        assert_eq!(session.state().table, before);
        assert!(session.state().last_export_path.is_none());
    }

    #[test]
    fn test_invalid_bound_surfaces_filter_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = loaded_session(dir.path());
        let err = session
            .export(
                &make_settings(ExportFormat::Csv),
                "low",
                "2",
                &dir.path().join("out.csv"),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, LogSheetError::Filter(_)));
        assert!(session.state().status_message.starts_with("Export failed"));
    }
}
