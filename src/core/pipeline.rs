// LogSheet - core/pipeline.rs
//
// Composition of the table stages for one export request:
// filter -> derive -> summarise -> assemble.
// Borrows the loaded table; never mutates it.

use crate::core::model::{ExportRequest, ResultTable, Stage, Table};
use crate::core::{assemble, derive, filter, summary};
use crate::util::error::TableError;

/// Run the table stages, reporting each completed stage to `on_stage`.
///
/// Every source column the request names is checked before any row is
/// touched, so a bad column is reported even when the range matches nothing.
pub fn run<F>(
    table: &Table,
    request: &ExportRequest,
    mut on_stage: F,
) -> Result<ResultTable, TableError>
where
    F: FnMut(Stage),
{
    check_columns(table, request)?;

    let filtered = filter::apply_range(table, &request.filter)?;
    on_stage(Stage::Filtered);

    let derived = derive::add_elapsed_hours(filtered, &request.time_column, &request.hours_column)?;
    on_stage(Stage::Derived);

    let summary_row = summary::summarize(
        &derived,
        &request.output,
        &request.mean_columns,
        request.precision,
    )?;
    let result = assemble::assemble(&derived, &request.output, summary_row)?;
    on_stage(Stage::Assembled);

    tracing::info!(
        rows = result.rows.len(),
        columns = result.columns.len(),
        "Result table assembled"
    );
    Ok(result)
}

/// Fail with every missing column at once: the filter column, the time
/// column and each output column other than the derived hours column.
pub fn check_columns(table: &Table, request: &ExportRequest) -> Result<(), TableError> {
    let needed = [&request.filter.column, &request.time_column]
        .into_iter()
        .chain(
            request
                .output
                .columns
                .iter()
                .filter(|c| **c != request.hours_column),
        );

    let mut missing: Vec<String> = Vec::new();
    for name in needed {
        if table.column_index(name).is_none() && !missing.contains(name) {
            missing.push(name.clone());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::debug!(missing = ?missing, "Requested columns absent from table");
        Err(TableError::ColumnNotFound { columns: missing })
    }
}
