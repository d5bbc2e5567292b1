// LogSheet - platform/config.rs
//
// Optional TOML preset file: export columns, summary settings, sheet layout
// and log level. The file is only read when its path is given explicitly;
// nothing is persisted between runs.
//
// Unreadable or unparseable files are errors. Individual out-of-range values
// produce warnings and fall back to the defaults in util::constants.

use crate::util::constants;
use crate::util::error::ConfigError;
use std::path::Path;

/// Raw deserialisable shape of the preset file.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[columns]` section.
    pub columns: ColumnsSection,
    /// `[summary]` section.
    pub summary: SummarySection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[columns]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ColumnsSection {
    /// Raw elapsed-time column, in seconds.
    pub time: Option<String>,
    /// Name given to the derived hours column.
    pub hours: Option<String>,
    /// Column the range filter applies to.
    pub filter: Option<String>,
    /// Exported columns, in order.
    pub output: Option<Vec<String>>,
    /// Explicit mean set. When absent, every output column except the time
    /// columns and `non_averaged` is averaged.
    pub mean: Option<Vec<String>>,
    /// Output columns kept out of the default mean set.
    pub non_averaged: Option<Vec<String>>,
}

/// `[summary]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SummarySection {
    /// Decimal places for the summary means.
    pub precision: Option<u32>,
    /// Note text on the first summary cell.
    pub note: Option<String>,
    /// Summary row fill as "#RRGGBB".
    pub fill: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Cap on auto-sized column widths.
    pub max_column_width: Option<f64>,
    /// Padding added to every column width.
    pub column_padding: Option<f64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Columns --
    pub time_column: String,
    pub hours_column: String,
    pub filter_column: String,
    pub output_columns: Vec<String>,
    pub mean_columns: Option<Vec<String>>,
    pub non_averaged: Vec<String>,

    // -- Summary --
    pub precision: u32,
    pub note_text: String,
    pub summary_fill: u32,

    // -- Sheet layout --
    pub max_column_width: f64,
    pub column_padding: f64,

    // -- Logging --
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut output_columns = vec![
            constants::DEFAULT_TIME_COLUMN.to_string(),
            constants::DEFAULT_HOURS_COLUMN.to_string(),
        ];
        output_columns.extend(
            constants::DEFAULT_MEASUREMENT_COLUMNS
                .iter()
                .map(|c| c.to_string()),
        );
        Self {
            time_column: constants::DEFAULT_TIME_COLUMN.to_string(),
            hours_column: constants::DEFAULT_HOURS_COLUMN.to_string(),
            filter_column: constants::DEFAULT_FILTER_COLUMN.to_string(),
            output_columns,
            mean_columns: None,
            non_averaged: Vec::new(),
            precision: constants::DEFAULT_MEAN_PRECISION,
            note_text: constants::SUMMARY_NOTE_TEXT.to_string(),
            summary_fill: constants::SUMMARY_FILL_RGB,
            max_column_width: constants::DEFAULT_MAX_COLUMN_WIDTH,
            column_padding: constants::DEFAULT_COLUMN_PADDING,
            log_level: None,
        }
    }
}

/// Load and validate a preset file. `None` yields the defaults.
///
/// Returns the validated config and a list of non-fatal warnings.
pub fn load_config(path: Option<&Path>) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let Some(path) = path else {
        return Ok((AppConfig::default(), Vec::new()));
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Loaded preset file");
    let (config, warnings) = validate(raw);

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Preset validation produced warnings");
    }
    Ok((config, warnings))
}

/// Parse a preset from a TOML string (no file involved).
pub fn parse_config(content: &str) -> Result<(AppConfig, Vec<String>), toml::de::Error> {
    let raw: RawConfig = toml::from_str(content)?;
    Ok(validate(raw))
}

/// Validate each field, accumulating warnings for rejected values.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();
    let mut reject = |field: &str, value: String, expected: &str| {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value,
            expected: expected.to_string(),
        };
        warnings.push(format!("{err}. Using default."));
    };

    // -- Columns: single names --
    let columns = raw.columns;
    for (field, value, slot) in [
        ("[columns] time", columns.time, &mut config.time_column),
        ("[columns] hours", columns.hours, &mut config.hours_column),
        ("[columns] filter", columns.filter, &mut config.filter_column),
    ] {
        match value {
            Some(name) if name.trim().is_empty() => reject(field, name, "a column name"),
            Some(name) => *slot = name,
            None => {}
        }
    }

    // -- Columns: lists --
    if let Some(output) = columns.output {
        if output.is_empty() || output.iter().any(|c| c.trim().is_empty()) {
            reject(
                "[columns] output",
                format!("{output:?}"),
                "a non-empty list of column names",
            );
        } else {
            config.output_columns = output;
        }
    }
    if let Some(mean) = columns.mean {
        config.mean_columns = Some(mean);
    }
    if let Some(non_averaged) = columns.non_averaged {
        config.non_averaged = non_averaged;
    }

    // -- Summary: precision --
    if let Some(precision) = raw.summary.precision {
        if precision <= constants::MAX_MEAN_PRECISION {
            config.precision = precision;
        } else {
            reject(
                "[summary] precision",
                precision.to_string(),
                &format!("0-{}", constants::MAX_MEAN_PRECISION),
            );
        }
    }

    // -- Summary: note --
    if let Some(note) = raw.summary.note {
        config.note_text = note;
    }

    // -- Summary: fill --
    if let Some(fill) = raw.summary.fill {
        match parse_hex_colour(&fill) {
            Some(rgb) => config.summary_fill = rgb,
            None => reject("[summary] fill", fill, "a colour such as \"#FFFACD\""),
        }
    }

    // -- Export: max_column_width --
    if let Some(width) = raw.export.max_column_width {
        let allowed = constants::MIN_MAX_COLUMN_WIDTH..=constants::ABSOLUTE_MAX_COLUMN_WIDTH;
        if allowed.contains(&width) {
            config.max_column_width = width;
        } else {
            reject(
                "[export] max_column_width",
                width.to_string(),
                &format!(
                    "{}-{}",
                    constants::MIN_MAX_COLUMN_WIDTH,
                    constants::ABSOLUTE_MAX_COLUMN_WIDTH
                ),
            );
        }
    }

    // -- Export: column_padding --
    if let Some(padding) = raw.export.column_padding {
        if (0.0..=constants::MAX_COLUMN_PADDING).contains(&padding) {
            config.column_padding = padding;
        } else {
            reject(
                "[export] column_padding",
                padding.to_string(),
                &format!("0-{}", constants::MAX_COLUMN_PADDING),
            );
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            reject(
                "[logging] level",
                level,
                "one of error, warn, info, debug, trace",
            );
        }
    }

    (config, warnings)
}

/// Parse "#RRGGBB" or "RRGGBB" into `0xRRGGBB`.
fn parse_hex_colour(value: &str) -> Option<u32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
