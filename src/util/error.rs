// LogSheet - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Each pipeline stage returns its own error enum; the app layer wraps them
// in `LogSheetError` at the action boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogSheet operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogSheetError {
    /// The data section could not be extracted from the log.
    Parse(ParseError),

    /// A table operation (filter, derive, summary, assemble) failed.
    Table(TableError),

    /// User-supplied filter input was rejected.
    Filter(FilterError),

    /// Rendering or writing the output file failed.
    Export(ExportError),

    /// Preset file loading failed.
    Config(ConfigError),

    /// Export was requested before any table was loaded.
    NoTableLoaded,
}

impl fmt::Display for LogSheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Table(e) => write!(f, "Table error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::NoTableLoaded => write!(f, "No data loaded. Load a log file first."),
        }
    }
}

impl std::error::Error for LogSheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Table(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::NoTableLoaded => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to locating and reading the data section.
#[derive(Debug)]
pub enum ParseError {
    /// No line contains the data marker.
    NoDataSection,

    /// The marker was found but fewer than two lines follow it, so there is
    /// no header or no data slot.
    IncompleteDataSection {
        /// 1-based line number of the marker.
        marker_line: usize,
        /// Lines present after the marker.
        lines_after: usize,
    },

    /// I/O error while reading the log file.
    Io { file: PathBuf, source: io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDataSection => write!(f, "no data section found"),
            Self::IncompleteDataSection {
                marker_line,
                lines_after,
            } => write!(
                f,
                "data section at line {marker_line} is incomplete: expected a header \
                 and at least one data line, found {lines_after} line(s)"
            ),
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for LogSheetError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Table errors
// ---------------------------------------------------------------------------

/// Errors raised by the table stages of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// One or more requested columns do not exist in the table.
    ColumnNotFound { columns: Vec<String> },

    /// A stage has no rows to work on.
    EmptyResult { reason: &'static str },

    /// A row does not line up with the requested columns.
    ColumnMismatch { expected: usize, found: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound { columns } => match columns.as_slice() {
                [single] => write!(f, "column '{single}' not found"),
                many => {
                    let names: Vec<String> = many.iter().map(|c| format!("'{c}'")).collect();
                    write!(f, "columns not found: {}", names.join(", "))
                }
            },
            Self::EmptyResult { reason } => write!(f, "empty result: {reason}"),
            Self::ColumnMismatch { expected, found } => write!(
                f,
                "row has {found} cell(s) but {expected} column(s) were requested"
            ),
        }
    }
}

impl std::error::Error for TableError {}

impl From<TableError> for LogSheetError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to user-supplied filter input.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A range bound is not a finite number.
    InvalidRangeInput { bound: &'static str, input: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRangeInput { bound, input } => {
                write!(f, "{bound} bound '{input}' is not a number")
            }
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for LogSheetError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to rendering and writing output files.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// Spreadsheet rendering error.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The result does not fit on one worksheet.
    TooManyRows { count: usize, max: usize },

    /// The result has more columns than one worksheet holds.
    TooManyColumns { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "Spreadsheet export error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRows { count, max } => write!(
                f,
                "Export of {count} rows exceeds the worksheet maximum of {max}. \
                 Narrow the filter range to reduce the result set."
            ),
            Self::TooManyColumns { count, max } => write!(
                f,
                "Export of {count} columns exceeds the worksheet maximum of {max}"
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for LogSheetError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to preset file loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading the preset file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Preset parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Preset '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Preset I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogSheetError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogSheet results.
pub type Result<T> = std::result::Result<T, LogSheetError>;
