// LogSheet - app/settings.rs
//
// Export settings: the validated preset plus presentation-layer overrides,
// turned into a fresh `ExportRequest` for every export action.

use crate::core::export::{ExportFormat, SheetStyle};
use crate::core::filter;
use crate::core::model::{ExportRequest, OutputSpec};
use crate::core::summary;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::FilterError;

/// Everything an export needs apart from the range bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub filter_column: String,
    pub time_column: String,
    pub hours_column: String,
    pub output_columns: Vec<String>,
    /// Explicit mean set; `None` derives it from the output columns.
    pub mean_columns: Option<Vec<String>>,
    /// Output columns kept out of the derived mean set.
    pub non_averaged: Vec<String>,
    pub precision: u32,
    pub style: SheetStyle,
    pub format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ExportSettings {
    /// Build settings from a validated preset.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            filter_column: config.filter_column.clone(),
            time_column: config.time_column.clone(),
            hours_column: config.hours_column.clone(),
            output_columns: config.output_columns.clone(),
            mean_columns: config.mean_columns.clone(),
            non_averaged: config.non_averaged.clone(),
            precision: config.precision,
            style: SheetStyle {
                summary_fill: config.summary_fill,
                note_text: config.note_text.clone(),
                note_author: constants::SUMMARY_NOTE_AUTHOR.to_string(),
                max_column_width: config.max_column_width,
                column_padding: config.column_padding,
            },
            format: ExportFormat::default(),
        }
    }

    /// Columns averaged into the summary row.
    ///
    /// An explicit mean set is narrowed to the output columns; names outside
    /// the output are dropped with a warning. Without one this is every
    /// output column except the raw time column, the derived hours column and
    /// `non_averaged`.
    pub fn resolved_mean_columns(&self, output: &OutputSpec) -> Vec<String> {
        if let Some(ref explicit) = self.mean_columns {
            let (kept, dropped): (Vec<String>, Vec<String>) = explicit
                .iter()
                .cloned()
                .partition(|c| output.position(c).is_some());
            if !dropped.is_empty() {
                tracing::warn!(
                    dropped = ?dropped,
                    "Mean columns not in the output were ignored"
                );
            }
            return kept;
        }
        let mut excluded = vec![self.time_column.as_str(), self.hours_column.as_str()];
        excluded.extend(self.non_averaged.iter().map(String::as_str));
        summary::default_mean_columns(output, &excluded)
    }

    /// Build a request from textual bounds, as typed by the user.
    pub fn request(&self, lower: &str, upper: &str) -> Result<ExportRequest, FilterError> {
        let filter = filter::build_filter(&self.filter_column, lower, upper)?;
        let output = OutputSpec::new(self.output_columns.iter().cloned());
        let mean_columns = self.resolved_mean_columns(&output);
        Ok(ExportRequest {
            filter,
            time_column: self.time_column.clone(),
            hours_column: self.hours_column.clone(),
            output,
            mean_columns,
            precision: self.precision,
        })
    }
}
