// LogSheet - core/summary.rs
//
// Summary row: per-column means over the filtered rows.
// Core layer: pure logic.

use crate::core::model::{Cell, OutputSpec, SummaryRow, Table};
use crate::util::error::TableError;

/// Default mean set: every output column except the listed ones.
///
/// `excluded` carries the raw time column, the derived hours column, and any
/// identifier columns the caller does not want averaged.
pub fn default_mean_columns(output: &OutputSpec, excluded: &[&str]) -> Vec<String> {
    output
        .columns
        .iter()
        .filter(|c| !excluded.contains(&c.as_str()))
        .cloned()
        .collect()
}

/// Build the summary row aligned to `output`.
///
/// Mean-set columns hold the mean of their present values rounded to
/// `precision` decimals, or missing when the column has no values at all.
/// Every other column is missing.
pub fn summarize(
    table: &Table,
    output: &OutputSpec,
    mean_columns: &[String],
    precision: u32,
) -> Result<SummaryRow, TableError> {
    let indices = output
        .columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(stray) = mean_columns.iter().find(|c| output.position(c).is_none()) {
        return Err(TableError::ColumnNotFound {
            columns: vec![stray.clone()],
        });
    }

    let cells = output
        .columns
        .iter()
        .zip(&indices)
        .map(|(name, &idx)| {
            if mean_columns.contains(name) {
                Cell::from(column_mean(table, idx).map(|m| round_to(m, precision)))
            } else {
                Cell::Missing
            }
        })
        .collect();

    Ok(SummaryRow { cells })
}

/// Arithmetic mean of the present values in one column.
pub fn column_mean(table: &Table, idx: usize) -> Option<f64> {
    let (sum, count) = table
        .column_cells(idx)
        .filter_map(Cell::value)
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Round half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> Table {
        let mut table = Table::new(
            ["Time  (Sec)", "Time (Hour)", "Power", "Flow", "Sensor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        table.push_row([
            Cell::Number(0.0),
            Cell::Number(0.0),
            Cell::Number(1.0),
            Cell::Missing,
            Cell::Number(0.1),
        ]);
        table.push_row([
            Cell::Number(10.0),
            Cell::Number(0.002),
            Cell::Missing,
            Cell::Missing,
            Cell::Number(0.2),
        ]);
        table.push_row([
            Cell::Number(20.0),
            Cell::Number(0.005),
            Cell::Number(3.0),
            Cell::Missing,
            Cell::Number(0.2),
        ]);
        table
    }

    fn output() -> OutputSpec {
        OutputSpec::new(["Time  (Sec)", "Time (Hour)", "Power", "Flow", "Sensor"])
    }

    #[test]
    fn test_mean_skips_missing() {
        let table = make_table();
        let means = default_mean_columns(&output(), &["Time  (Sec)", "Time (Hour)"]);
        assert_eq!(means, ["Power", "Flow", "Sensor"]);

        let row = summarize(&table, &output(), &means, 3).unwrap();
        assert_eq!(
            row.cells,
            vec![
                Cell::Missing,
                Cell::Missing,
                Cell::Number(2.0),
                Cell::Missing,
                Cell::Number(0.167),
            ]
        );
    }

    #[test]
    fn test_non_mean_columns_are_missing_not_zero() {
        let table = make_table();
        let row = summarize(&table, &output(), &["Power".to_string()], 3).unwrap();
        assert_eq!(row.cells[0], Cell::Missing);
        assert_eq!(row.cells[4], Cell::Missing);
    }

    #[test]
    fn test_summary_follows_output_order() {
        let table = make_table();
        let out = OutputSpec::new(["Sensor", "Power"]);
        let row = summarize(&table, &out, &out.columns, 1).unwrap();
        assert_eq!(row.cells, vec![Cell::Number(0.2), Cell::Number(2.0)]);
    }

    #[test]
    fn test_unknown_output_column() {
        let table = make_table();
        let out = OutputSpec::new(["Power", "Voltage"]);
        let err = summarize(&table, &out, &[], 3).unwrap_err();
        assert_eq!(
            err,
            TableError::ColumnNotFound {
                columns: vec!["Voltage".to_string()]
            }
        );
    }

    #[test]
    fn test_mean_column_outside_output() {
        let table = make_table();
        let out = OutputSpec::new(["Power"]);
        let err = summarize(&table, &out, &["Sensor".to_string()], 3).unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound { columns } if columns == ["Sensor"]));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_to(-1.2345, 2), -1.23);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(f64::MAX, 3), f64::MAX);
    }
}
