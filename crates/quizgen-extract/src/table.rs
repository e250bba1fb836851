//! Tabular extraction: spreadsheets and delimited text, rendered as a
//! whitespace-aligned table with the header row included and no
//! row-index column.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, XlsxError, open_workbook};

use crate::ExtractError;

/// Extract the first worksheet of an XLSX workbook.
pub fn extract_xlsx(path: &Path) -> Result<String, ExtractError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: XlsxError| ExtractError::Spreadsheet(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ExtractError::Spreadsheet(e.to_string()))?,
        None => return Ok(String::new()),
    };

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(render_table(&rows))
}

fn cell_to_string(cell: &Data) -> String {
    cell.to_string()
}

/// Extract a CSV file. The first record is treated as the header row;
/// ragged rows are tolerated.
pub fn extract_csv(path: &Path) -> Result<String, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(render_table(&rows))
}

/// Lay rows out in right-aligned columns: each column is padded to its
/// widest cell, cells are joined with a single space, and trailing
/// whitespace is dropped from each line.
fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            for _ in cell.chars().count()..*width {
                line.push(' ');
            }
            line.push_str(cell);
        }
        while line.ends_with(' ') {
            line.pop();
        }
        lines.push(line);
    }

    lines.join("\n")
}
