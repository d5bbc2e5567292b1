// LogSheet - core/derive.rs
//
// Derived elapsed-time column: hours since the first retained row.
// Core layer: pure logic.

use crate::core::model::{Cell, Table};
use crate::util::constants::SECONDS_PER_HOUR;
use crate::util::error::TableError;

/// Add (or overwrite) `hours_column` with `(secs - secs_first) / 3600`.
///
/// The first row is the time-zero reference, so an empty table or a first
/// row without a seconds value fails with `EmptyResult`. Later rows with a
/// missing seconds value get a missing hours value.
pub fn add_elapsed_hours(
    mut table: Table,
    seconds_column: &str,
    hours_column: &str,
) -> Result<Table, TableError> {
    let col = table.require_column(seconds_column)?;

    let first = table.rows().first().ok_or(TableError::EmptyResult {
        reason: "no rows fall inside the filter range",
    })?;
    let zero = first[col].value().ok_or(TableError::EmptyResult {
        reason: "the first retained row has no time value",
    })?;

    let hours: Vec<Cell> = table
        .column_cells(col)
        .map(|cell| Cell::from(cell.value().map(|secs| (secs - zero) / SECONDS_PER_HOUR)))
        .collect();

    table.set_column(hours_column, hours)?;
    tracing::debug!(
        source = seconds_column,
        target = hours_column,
        reference_secs = zero,
        "Elapsed hours derived"
    );
    Ok(table)
}
