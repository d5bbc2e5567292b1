// LogSheet - core/filter.rs
//
// Inclusive numeric range filter over one table column.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{FilterSpec, Table};
use crate::util::error::{FilterError, TableError};

/// Parse a user-supplied range bound.
///
/// `bound` names the bound ("lower" / "upper") for the error message.
/// Non-numeric and non-finite input is rejected.
pub fn parse_bound(bound: &'static str, input: &str) -> Result<f64, FilterError> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FilterError::InvalidRangeInput {
            bound,
            input: input.to_string(),
        }),
    }
}

/// Build a [`FilterSpec`] from textual bounds.
pub fn build_filter(column: &str, lower: &str, upper: &str) -> Result<FilterSpec, FilterError> {
    Ok(FilterSpec {
        column: column.to_string(),
        lower: parse_bound("lower", lower)?,
        upper: parse_bound("upper", upper)?,
    })
}

/// Indices of rows whose filter column is present and within range.
pub fn matching_indices(table: &Table, range: &FilterSpec) -> Result<Vec<usize>, TableError> {
    let col = table.require_column(&range.column)?;
    Ok(table
        .column_cells(col)
        .enumerate()
        .filter(|(_, cell)| cell.value().is_some_and(|v| range.contains(v)))
        .map(|(idx, _)| idx)
        .collect())
}

/// Return a new table holding only the rows that pass `range`.
///
/// Rows with a missing filter value never pass. The input is not modified.
pub fn apply_range(table: &Table, range: &FilterSpec) -> Result<Table, TableError> {
    let keep = matching_indices(table, range)?;
    tracing::debug!(
        column = %range.column,
        lower = range.lower,
        upper = range.upper,
        kept = keep.len(),
        total = table.row_count(),
        "Range filter applied"
    );
    Ok(table.select_rows(keep.iter().map(|&i| &table.rows()[i])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Cell;

    fn make_table(values: &[Option<f64>]) -> Table {
        let mut table = Table::new(vec!["id".to_string(), "current".to_string()]);
        for (i, v) in values.iter().enumerate() {
            table.push_row([Cell::Number(i as f64), Cell::from(*v)]);
        }
        table
    }

    fn range(lower: f64, upper: f64) -> FilterSpec {
        FilterSpec {
            column: "current".to_string(),
            lower,
            upper,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let table = make_table(&[Some(0.5), Some(1.0), Some(1.5), Some(2.0), Some(2.5)]);
        let result = matching_indices(&table, &range(1.0, 2.0)).unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_never_passes() {
        let table = make_table(&[None, Some(1.0), None]);
        let filtered = apply_range(&table, &range(f64::MIN, f64::MAX)).unwrap();
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.rows()[0][1], Cell::Number(1.0));
    }

    #[test]
    fn test_reversed_bounds_match_nothing() {
        let table = make_table(&[Some(1.0), Some(2.0)]);
        let filtered = apply_range(&table, &range(2.0, 1.0)).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.columns(), table.columns());
    }

    #[test]
    fn test_input_table_untouched() {
        let table = make_table(&[Some(1.0), Some(5.0)]);
        let before = table.clone();
        let _ = apply_range(&table, &range(0.0, 2.0)).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_unknown_column() {
        let table = make_table(&[Some(1.0)]);
        let mut bad = range(0.0, 1.0);
        bad.column = "voltage".to_string();
        let err = apply_range(&table, &bad).unwrap_err();
        assert_eq!(
            err,
            TableError::ColumnNotFound {
                columns: vec!["voltage".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound("lower", " 1.25 ").unwrap(), 1.25);
        assert!(matches!(
            parse_bound("upper", "abc"),
            Err(FilterError::InvalidRangeInput { bound: "upper", .. })
        ));
        assert!(parse_bound("lower", "").is_err());
        assert!(parse_bound("lower", "NaN").is_err());
    }

    #[test]
    fn test_build_filter_reports_first_bad_bound() {
        let err = build_filter("current", "x", "y").unwrap_err();
        assert_eq!(err.to_string(), "lower bound 'x' is not a number");
    }
}
