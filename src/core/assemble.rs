// LogSheet - core/assemble.rs
//
// Final row ordering: summary row first, then the detail rows projected
// onto the output columns.

use crate::core::model::{OutputSpec, ResultTable, SummaryRow, Table};
use crate::util::error::TableError;

/// Project `table` onto `output` and prepend `summary`.
pub fn assemble(
    table: &Table,
    output: &OutputSpec,
    summary: SummaryRow,
) -> Result<ResultTable, TableError> {
    let indices = output
        .columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;

    if summary.cells.len() != output.len() {
        return Err(TableError::ColumnMismatch {
            expected: output.len(),
            found: summary.cells.len(),
        });
    }

    let rows = table
        .rows()
        .iter()
        .map(|row| indices.iter().map(|&i| row[i]).collect())
        .collect();

    Ok(ResultTable {
        columns: output.columns.clone(),
        summary,
        rows,
    })
}
