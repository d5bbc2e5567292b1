// LogSheet - app/state.rs
//
// Application state: the loaded table and the outcome of the last action.
// Owned by a `Session`; the table is replaced only by a successful load.

use crate::core::model::Table;
use std::path::PathBuf;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Table from the most recent successful load.
    pub table: Option<Table>,

    /// File the table was loaded from.
    pub source_path: Option<PathBuf>,

    /// Destination of the most recent successful export.
    pub last_export_path: Option<PathBuf>,

    /// Status message for the presentation layer.
    pub status_message: String,

    /// Non-fatal warnings from the most recent load.
    pub warnings: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create initial state with nothing loaded.
    pub fn new() -> Self {
        Self {
            table: None,
            source_path: None,
            last_export_path: None,
            status_message: "Ready. Load a log file to begin.".to_string(),
            warnings: Vec::new(),
        }
    }

    /// Install a freshly parsed table, replacing any previous one.
    pub fn replace_table(&mut self, table: Table, source: PathBuf, warnings: Vec<String>) {
        self.table = Some(table);
        self.source_path = Some(source);
        self.warnings = warnings;
    }

    /// Whether a table is loaded.
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    /// Column names of the loaded table (empty if nothing is loaded).
    pub fn columns(&self) -> &[String] {
        match &self.table {
            Some(table) => table.columns(),
            None => &[],
        }
    }
}
