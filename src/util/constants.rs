// LogSheet - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogSheet";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input format
// =============================================================================

/// Token that marks the start of the embedded data section.
/// The line after the marker is the header; data rows follow.
pub const DATA_MARKER: &str = "***DATA***";

/// Field separator for the header and data lines.
pub const FIELD_SEPARATOR: char = '\t';

/// Maximum number of ragged-row warnings kept per parse before suppression.
pub const MAX_PARSE_WARNINGS: usize = 1_000;

// =============================================================================
// Instrument preset (defaults for the export columns)
// =============================================================================

/// Raw elapsed-time column, in seconds.
pub const DEFAULT_TIME_COLUMN: &str = "Time  (Sec)";

/// Name of the derived elapsed-time column, in hours.
pub const DEFAULT_HOURS_COLUMN: &str = "Time (Hour)";

/// Column the range filter is applied to.
pub const DEFAULT_FILTER_COLUMN: &str = "Cell Current (A)";

/// Measurement columns exported after the two time columns.
pub const DEFAULT_MEASUREMENT_COLUMNS: &[&str] = &[
    "Cell Power(W)",
    "Anode O2 MFM Flow(sccm)",
    "Cathode H2 MFM Flow(sccm)",
    "Anode H2 Sensor(%)",
    "Cathode O2 Sensor(%)",
];

/// Seconds per hour, used by the derived time column.
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

// =============================================================================
// Summary row
// =============================================================================

/// Decimal places the summary means are rounded to.
pub const DEFAULT_MEAN_PRECISION: u32 = 3;

/// Highest accepted rounding precision.
pub const MAX_MEAN_PRECISION: u32 = 10;

/// Text of the note attached to the first summary cell.
pub const SUMMARY_NOTE_TEXT: &str = "Average value";

/// Author shown on the summary note.
pub const SUMMARY_NOTE_AUTHOR: &str = "System";

/// Background colour of the summary row (light yellow, `#FFFACD`).
pub const SUMMARY_FILL_RGB: u32 = 0xFF_FA_CD;

// =============================================================================
// Spreadsheet layout
// =============================================================================

/// Upper bound on an auto-sized column width, in characters.
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 50.0;

/// Minimum accepted value for the width cap.
pub const MIN_MAX_COLUMN_WIDTH: f64 = 5.0;

/// Hard upper bound on a column width (spreadsheet limit).
pub const ABSOLUTE_MAX_COLUMN_WIDTH: f64 = 255.0;

/// Extra characters added to every auto-sized column.
pub const DEFAULT_COLUMN_PADDING: f64 = 2.0;

/// Largest accepted column padding.
pub const MAX_COLUMN_PADDING: f64 = 20.0;

/// Rows available on one worksheet.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Columns available on one worksheet.
pub const MAX_SHEET_COLUMNS: usize = 16_384;

// =============================================================================
// Progress reporting
// =============================================================================

/// Load action: file read into memory.
pub const PROGRESS_LOAD_READ: u8 = 50;

/// Load action: table parsed and stored.
pub const PROGRESS_LOAD_DONE: u8 = 100;

/// Export action: range filter applied.
pub const PROGRESS_EXPORT_FILTERED: u8 = 20;

/// Export action: derived time column computed.
pub const PROGRESS_EXPORT_DERIVED: u8 = 40;

/// Export action: summary computed and result table assembled.
pub const PROGRESS_EXPORT_ASSEMBLED: u8 = 60;

/// Export action: output bytes rendered in memory.
pub const PROGRESS_EXPORT_RENDERED: u8 = 80;

/// Export action: file written.
pub const PROGRESS_EXPORT_DONE: u8 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor --debug is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Suffix appended to the input file stem for the default output name.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_filtered";
