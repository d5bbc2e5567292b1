// LogSheet - core/parser.rs
//
// Extraction of the tab-separated data section embedded in an instrument
// log. Core layer: accepts already-decoded text, never touches the
// filesystem directly.

use crate::core::model::{Cell, RowFit, Table};
use crate::util::constants::{DATA_MARKER, FIELD_SEPARATOR, MAX_PARSE_WARNINGS};
use crate::util::error::ParseError;

/// A data row whose field count differed from the header.
///
/// Short rows are padded with missing cells and long rows lose their extra
/// fields; the row is kept either way and reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaggedRow {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub fields: usize,
    pub expected: usize,
}

/// Result of parsing one log.
#[derive(Debug)]
pub struct ParseResult {
    pub table: Table,
    /// Rows that did not match the header width (capped at MAX_PARSE_WARNINGS).
    pub ragged_rows: Vec<RaggedRow>,
    /// Total ragged rows, including those beyond the cap.
    pub ragged_total: usize,
    /// 1-based line number of the marker line.
    pub marker_line: usize,
}

/// Parse decoded log text.
pub fn parse_content(content: &str) -> Result<ParseResult, ParseError> {
    let lines: Vec<&str> = content.lines().collect();
    parse_lines(&lines)
}

/// Parse a log that has already been split into lines.
///
/// The first line containing the marker starts the data section; the line
/// after it is the header and every later non-blank line is a row. At least
/// two lines must follow the marker, although the second may be blank.
pub fn parse_lines(lines: &[&str]) -> Result<ParseResult, ParseError> {
    let marker_idx = lines
        .iter()
        .position(|line| line.contains(DATA_MARKER))
        .ok_or(ParseError::NoDataSection)?;

    let lines_after = lines.len() - marker_idx - 1;
    if lines_after < 2 {
        return Err(ParseError::IncompleteDataSection {
            marker_line: marker_idx + 1,
            lines_after,
        });
    }

    let header: Vec<String> = strip_line(lines[marker_idx + 1])
        .split(FIELD_SEPARATOR)
        .map(str::to_string)
        .collect();
    let mut table = Table::new(header);
    let width = table.column_count();

    let mut ragged_rows = Vec::new();
    let mut ragged_total = 0usize;

    let data_start = marker_idx + 2;
    for (offset, line) in lines[data_start..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<Cell> = strip_line(line)
            .split(FIELD_SEPARATOR)
            .map(coerce_number)
            .collect();
        let fields = cells.len();
        let fit = table.push_row(cells);

        if fit != RowFit::Exact {
            ragged_total += 1;
            if ragged_rows.len() < MAX_PARSE_WARNINGS {
                ragged_rows.push(RaggedRow {
                    line_number: data_start + offset + 1,
                    fields,
                    expected: width,
                });
            }
        }
    }

    if ragged_total > 0 {
        tracing::warn!(
            ragged = ragged_total,
            expected = width,
            "Rows with a different field count than the header were fitted"
        );
    }
    tracing::debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        marker_line = marker_idx + 1,
        "Data section parsed"
    );

    Ok(ParseResult {
        table,
        ragged_rows,
        ragged_total,
        marker_line: marker_idx + 1,
    })
}

/// Strip surrounding whitespace other than the field separator, so an empty
/// leading or trailing field keeps its position.
fn strip_line(line: &str) -> &str {
    line.trim_matches(|c: char| c != FIELD_SEPARATOR && c.is_whitespace())
}

/// Permissive numeric coercion.
///
/// Surrounding whitespace is ignored; anything that does not parse as a
/// finite `f64` (text, empty fields, `nan`, `inf`) becomes missing.
pub fn coerce_number(field: &str) -> Cell {
    match field.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Missing,
    }
}
