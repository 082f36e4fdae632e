#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{ReportError, ReportResult};
use crate::types::DataSet;

use super::infer::{build_dataset, normalize_headers, RawCell};

/// Integral floats up to this magnitude are exact and load as integers.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Load an Excel workbook (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`) held in memory into a `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Skips fully empty rows below the header
/// - Infers one type per column; integral numbers load as integers
pub fn load_excel_from_bytes(
    bytes: &[u8],
    sheet_name: Option<&str>,
    na_values: &[String],
) -> ReportResult<DataSet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ReportError::MalformedInput {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    load_sheet_range(&sheet, &range, na_values)
}

fn load_sheet_range(
    sheet: &str,
    range: &calamine::Range<Data>,
    na_values: &[String],
) -> ReportResult<DataSet> {
    let mut rows = range.rows().skip_while(|row| is_empty_row(row));

    let header = rows.next().ok_or_else(|| ReportError::MalformedInput {
        message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
    })?;
    let names = normalize_headers(header.iter().map(cell_to_header_string));
    let width = names.len();

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::new(); width];
    for row in rows {
        if is_empty_row(row) {
            continue;
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = row.get(idx).unwrap_or(&Data::Empty);
            column.push(classify_cell(cell, na_values));
        }
    }

    Ok(build_dataset(names, columns))
}

fn is_empty_row(row: &[Data]) -> bool {
    row.iter().all(|c| matches!(c, Data::Empty))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn classify_cell(c: &Data, na_values: &[String]) -> RawCell {
    match c {
        Data::Empty => RawCell::Missing,
        Data::Int(i) => RawCell::Int(*i, i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => {
            RawCell::Int(*f as i64, (*f as i64).to_string())
        }
        Data::Float(f) => RawCell::Float(*f, f.to_string()),
        Data::Bool(b) => RawCell::Bool(*b, if *b { "True" } else { "False" }.to_string()),
        Data::String(s) => text_cell(s, na_values),
        // Formula errors display as `#N/A`, `#DIV/0!`, ...
        Data::Error(e) => text_cell(&e.to_string(), na_values),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        other => RawCell::Text(other.to_string()),
    }
}

fn text_cell(s: &str, na_values: &[String]) -> RawCell {
    let trimmed = s.trim();
    if trimmed.is_empty() || na_values.iter().any(|na| na == trimmed) {
        RawCell::Missing
    } else {
        RawCell::Text(trimmed.to_owned())
    }
}
