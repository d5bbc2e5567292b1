// LogSheet - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::TableError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

// =============================================================================
// Cell
// =============================================================================

/// A single table cell: a number, or a value that failed numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Number(f64),
    Missing,
}

impl Cell {
    /// The numeric value, if present.
    pub fn value(self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(v),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Cell::Missing, Cell::Number)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(v) => serializer.serialize_f64(*v),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// How an incoming row was fitted to the table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFit {
    /// The row had exactly one field per column.
    Exact,
    /// The row was short; this many trailing cells were filled as missing.
    Padded(usize),
    /// The row was long; this many extra fields were dropped.
    Truncated(usize),
}

/// Named columns plus rows of cells.
///
/// Invariant: every row holds exactly `columns.len()` cells. `push_row` is
/// the only way rows enter a table and it enforces the width by padding
/// short rows with [`Cell::Missing`] and dropping extra fields.
///
/// Header names may repeat; name lookups resolve to the first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names, in order.
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in input order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Like [`Table::column_index`] but fails with `ColumnNotFound`.
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                columns: vec![name.to_string()],
            })
    }

    /// Append a row, fitting it to the table width.
    pub fn push_row(&mut self, cells: impl IntoIterator<Item = Cell>) -> RowFit {
        let width = self.columns.len();
        let mut row: Vec<Cell> = cells.into_iter().collect();
        let fit = match row.len() {
            n if n == width => RowFit::Exact,
            n if n < width => {
                row.resize(width, Cell::Missing);
                RowFit::Padded(width - n)
            }
            n => {
                row.truncate(width);
                RowFit::Truncated(n - width)
            }
        };
        self.rows.push(row);
        fit
    }

    /// Iterate over one column's cells.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().map(move |row| row[idx])
    }

    /// Build a table with the same columns holding only the selected rows.
    pub fn select_rows<'a>(&self, rows: impl IntoIterator<Item = &'a Vec<Cell>>) -> Self {
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows: rows.into_iter().cloned().collect(),
        }
    }

    /// Replace the values of column `name`, or append it when absent.
    ///
    /// `values` must hold one cell per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnMismatch {
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.index.insert(name.to_string(), self.columns.len());
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Export request types
// =============================================================================

/// Inclusive numeric range applied to one column.
///
/// Bound order is not validated: `lower > upper` simply matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub column: String,
    pub lower: f64,
    pub upper: f64,
}

impl FilterSpec {
    /// Inclusive membership test on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Ordered list of columns written to the export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputSpec {
    pub columns: Vec<String>,
}

impl OutputSpec {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Everything one export action needs besides the loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub filter: FilterSpec,
    /// Source column for the derived time column, in seconds.
    pub time_column: String,
    /// Name of the derived elapsed-time column, in hours.
    pub hours_column: String,
    pub output: OutputSpec,
    /// Output columns averaged into the summary row.
    pub mean_columns: Vec<String>,
    /// Decimal places applied to summary means.
    pub precision: u32,
}

// =============================================================================
// Summary and result
// =============================================================================

/// Synthetic row of per-column means, aligned to an [`OutputSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub cells: Vec<Cell>,
}

/// The export payload: summary row first, then the filtered detail rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub summary: SummaryRow,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    /// Number of rows including the summary row.
    pub fn len(&self) -> usize {
        self.rows.len() + 1
    }

    /// Always false: the summary row is present even with no detail rows.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All rows in output order, summary row first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        std::iter::once(self.summary.cells.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

impl Serialize for ResultTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<&[Cell]> = self.iter_rows().collect();
        let mut state = serializer.serialize_struct("ResultTable", 2)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}

// =============================================================================
// Progress (for presentation layers)
// =============================================================================

/// Pipeline stage boundaries reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Parsed,
    Filtered,
    Derived,
    Assembled,
    Rendered,
    Written,
}

impl Stage {
    /// Human-readable label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Read => "File read",
            Stage::Parsed => "Data parsed",
            Stage::Filtered => "Rows filtered",
            Stage::Derived => "Time column derived",
            Stage::Assembled => "Summary assembled",
            Stage::Rendered => "Output rendered",
            Stage::Written => "File written",
        }
    }
}
