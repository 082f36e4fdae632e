#![cfg(feature = "excel")]

use rust_xlsxwriter::Workbook;

use crate::error::{ReportError, ReportResult};
use crate::types::{DataSet, Value};

/// Name of the single worksheet written on export.
pub const SHEET_NAME: &str = "Sheet1";

/// Serialize `dataset` as a single-sheet `.xlsx` workbook held in memory.
///
/// Row 0 holds the column names; data starts at row 1. No index column is written.
/// Numbers are numeric cells, booleans boolean cells, text string cells; missing values
/// are left blank.
pub fn write_xlsx_to_vec(dataset: &DataSet) -> ReportResult<Vec<u8>> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_NAME)?;

    for (col_idx, name) in dataset.schema.field_names().enumerate() {
        ws.write_string(0, sheet_col(col_idx)?, name)?;
    }

    for (row_idx0, row) in dataset.rows.iter().enumerate() {
        let r = sheet_row(row_idx0 + 1)?;
        for (col_idx, value) in row.iter().enumerate() {
            let c = sheet_col(col_idx)?;
            match value {
                Value::Null => {}
                Value::Int64(v) => {
                    ws.write_number(r, c, *v as f64)?;
                }
                Value::Float64(v) => {
                    ws.write_number(r, c, *v)?;
                }
                Value::Bool(v) => {
                    ws.write_boolean(r, c, *v)?;
                }
                Value::Utf8(s) => {
                    ws.write_string(r, c, s)?;
                }
            }
        }
    }

    Ok(wb.save_to_buffer()?)
}

fn sheet_row(idx: usize) -> ReportResult<u32> {
    u32::try_from(idx).map_err(|_| ReportError::MalformedInput {
        message: format!("row {idx} exceeds the worksheet row limit"),
    })
}

fn sheet_col(idx: usize) -> ReportResult<u16> {
    u16::try_from(idx).map_err(|_| ReportError::MalformedInput {
        message: format!("column {idx} exceeds the worksheet column limit"),
    })
}
