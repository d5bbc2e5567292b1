// LogSheet - core/export.rs
//
// Rendering of the assembled result table: formatted xlsx workbook, plus
// CSV and JSON for downstream tooling.
// Core layer: renders to memory or to any Write trait object; the app layer
// owns the destination file.

use crate::core::model::{Cell, ResultTable};
use crate::util::constants;
use crate::util::error::ExportError;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Note, Workbook, XlsxError};
use std::io::Write;
use std::path::Path;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a destination path; unknown extensions are `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Visual settings for the xlsx output.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    /// Summary row background, as `0xRRGGBB`.
    pub summary_fill: u32,
    pub note_text: String,
    pub note_author: String,
    /// Cap on an auto-sized column width, in characters.
    pub max_column_width: f64,
    /// Characters added after the cap is applied.
    pub column_padding: f64,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            summary_fill: constants::SUMMARY_FILL_RGB,
            note_text: constants::SUMMARY_NOTE_TEXT.to_string(),
            note_author: constants::SUMMARY_NOTE_AUTHOR.to_string(),
            max_column_width: constants::DEFAULT_MAX_COLUMN_WIDTH,
            column_padding: constants::DEFAULT_COLUMN_PADDING,
        }
    }
}

/// Render `result` in `format`, entirely in memory.
pub fn render(
    result: &ResultTable,
    format: ExportFormat,
    style: &SheetStyle,
    export_path: &Path,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => render_xlsx(result, style, export_path),
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            export_csv(result, &mut buf, export_path)?;
            Ok(buf)
        }
        ExportFormat::Json => {
            let mut buf = Vec::new();
            export_json(result, &mut buf, export_path)?;
            Ok(buf)
        }
    }
}

/// Text shown for a cell, also used for column auto-width.
pub fn render_cell(cell: Cell) -> String {
    match cell {
        Cell::Number(v) => v.to_string(),
        Cell::Missing => String::new(),
    }
}

/// Auto-width per column: longest rendered value (header included), capped,
/// plus padding.
pub fn column_widths(result: &ResultTable, style: &SheetStyle) -> Vec<f64> {
    result
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let longest = result
                .iter_rows()
                .map(|row| render_cell(row[col]).chars().count())
                .fold(name.chars().count(), usize::max);
            (longest as f64).min(style.max_column_width) + style.column_padding
        })
        .collect()
}

/// Render the formatted workbook.
///
/// Row 1 holds bold headers, row 2 the highlighted summary row with a note
/// on its first cell, rows 3+ the detail rows. Every cell is centered with a
/// thin border; missing values are written as formatted blanks.
pub fn render_xlsx(
    result: &ResultTable,
    style: &SheetStyle,
    export_path: &Path,
) -> Result<Vec<u8>, ExportError> {
    check_sheet_limits(result)?;

    let mut workbook = build_workbook(result, style).map_err(|e| ExportError::Xlsx {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    let bytes = workbook.save_to_buffer().map_err(|e| ExportError::Xlsx {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        bytes = bytes.len(),
        rows = result.len(),
        "Workbook rendered"
    );
    Ok(bytes)
}

fn check_sheet_limits(result: &ResultTable) -> Result<(), ExportError> {
    // Header row plus summary plus detail rows.
    let rows = result.len() + 1;
    if rows > constants::MAX_SHEET_ROWS {
        return Err(ExportError::TooManyRows {
            count: rows,
            max: constants::MAX_SHEET_ROWS,
        });
    }
    if result.columns.len() > constants::MAX_SHEET_COLUMNS {
        return Err(ExportError::TooManyColumns {
            count: result.columns.len(),
            max: constants::MAX_SHEET_COLUMNS,
        });
    }
    Ok(())
}

fn build_workbook(result: &ResultTable, style: &SheetStyle) -> Result<Workbook, XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let data_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let summary_format = data_format
        .clone()
        .set_background_color(Color::RGB(style.summary_fill));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in result.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (row_idx, row) in result.iter_rows().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        let format = if row_idx == 0 {
            &summary_format
        } else {
            &data_format
        };
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Number(v) => {
                    worksheet.write_number_with_format(sheet_row, col as u16, *v, format)?;
                }
                Cell::Missing => {
                    worksheet.write_blank(sheet_row, col as u16, format)?;
                }
            }
        }
    }

    if !result.columns.is_empty() {
        let note = Note::new(&style.note_text)
            .set_author(&style.note_author)
            .add_author_prefix(false);
        worksheet.insert_note(1, 0, &note)?;
    }

    for (col, width) in column_widths(result, style).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }

    Ok(workbook)
}

/// Export the result as CSV: header line, summary row, detail rows.
/// Missing cells are empty fields.
pub fn export_csv<W: Write>(
    result: &ResultTable,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(&result.columns)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for row in result.iter_rows() {
        csv_writer
            .write_record(row.iter().map(|c| render_cell(*c)))
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export the result as JSON: `{"columns": [...], "rows": [[...], ...]}`,
/// summary row first, missing cells as `null`.
pub fn export_json<W: Write>(
    result: &ResultTable,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, result).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(result.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::SummaryRow;
    use std::path::PathBuf;

    fn make_result() -> ResultTable {
        ResultTable {
            columns: vec!["Time (Hour)".to_string(), "Power".to_string()],
            summary: SummaryRow {
                cells: vec![Cell::Missing, Cell::Number(12.0)],
            },
            rows: vec![
                vec![Cell::Number(0.0), Cell::Number(10.0)],
                vec![Cell::Number(0.5), Cell::Missing],
            ],
        }
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let count = export_csv(&make_result(), &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 3);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, ["Time (Hour),Power", ",12", "0,10", "0.5,"]);
    }

    #[test]
    fn test_json_export() {
        let mut buf = Vec::new();
        let count = export_json(&make_result(), &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 3);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["columns"][1], "Power");
        assert!(value["rows"][0][0].is_null());
        assert_eq!(value["rows"][0][1], 12.0);
        assert_eq!(value["rows"][2][0], 0.5);
    }

    #[test]
    fn test_column_widths_capped_and_padded() {
        let mut result = make_result();
        result.columns[1] = "P".repeat(80);
        let style = SheetStyle::default();
        let widths = column_widths(&result, &style);
        assert_eq!(widths, vec![11.0 + 2.0, 50.0 + 2.0]);
    }

    #[test]
    fn test_column_width_counts_values() {
        let mut result = make_result();
        result.rows[0][0] = Cell::Number(1_234_567.890_625);
        let widths = column_widths(&result, &SheetStyle::default());
        assert_eq!(widths[0], 14.0 + 2.0);
    }

    #[test]
    fn test_xlsx_render_produces_zip() {
        let bytes = render_xlsx(&make_result(), &SheetStyle::default(), Path::new("out.xlsx"))
            .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    /// Read one part of a rendered workbook as text.
    fn read_part(bytes: &[u8], name: &str) -> String {
        use std::io::Read;
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut text = String::new();
        part.read_to_string(&mut text).unwrap();
        text
    }

    /// `width` attributes of the `<col>` elements, in order.
    fn col_widths(sheet_xml: &str) -> Vec<f64> {
        sheet_xml
            .split("<col ")
            .skip(1)
            .map(|tag| {
                let start = tag.find("width=\"").unwrap() + "width=\"".len();
                let len = tag[start..].find('"').unwrap();
                tag[start..start + len].parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_xlsx_summary_note_and_fill() {
        let bytes = render_xlsx(&make_result(), &SheetStyle::default(), Path::new("out.xlsx"))
            .unwrap();

        let comments = read_part(&bytes, "xl/comments1.xml");
        assert!(comments.contains("Average value"), "{comments}");
        assert!(comments.contains("<author>System</author>"), "{comments}");
        assert!(comments.contains("ref=\"A2\""), "{comments}");

        let styles = read_part(&bytes, "xl/styles.xml");
        assert!(styles.contains("FFFFFACD"), "{styles}");
        assert!(styles.contains("<b/>"), "{styles}");
        assert!(styles.contains("style=\"thin\""), "{styles}");
        assert!(styles.contains("horizontal=\"center\""), "{styles}");
    }

    #[test]
    fn test_xlsx_blank_cells_keep_format() {
        let bytes = render_xlsx(&make_result(), &SheetStyle::default(), Path::new("out.xlsx"))
            .unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        // Missing summary cell and missing detail cell are styled blanks.
        assert!(sheet.contains("<c r=\"A2\" s=\""), "{sheet}");
        assert!(sheet.contains("<c r=\"B4\" s=\""), "{sheet}");
    }

    #[test]
    fn test_xlsx_column_widths_written() {
        let mut result = make_result();
        result.columns[1] = "P".repeat(80);
        let style = SheetStyle::default();
        let bytes = render_xlsx(&result, &style, &PathBuf::from("out.xlsx")).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        let expected = column_widths(&result, &style);
        let written = col_widths(&sheet);
        assert_eq!(written.len(), expected.len(), "{sheet}");
        // Stored widths include the cell margin, less than one character.
        for (w, e) in written.iter().zip(&expected) {
            assert!(*e <= *w && *w < *e + 1.0, "written {w}, expected {e}");
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("a/b.XLSX")),
            Some(ExportFormat::Xlsx)
        );
        assert_eq!(ExportFormat::from_path(Path::new("b.csv")), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_path(Path::new("b")), None);
    }
}
