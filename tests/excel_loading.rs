#![cfg(feature = "excel")]

use report_analyzer::export::excel::SHEET_NAME;
use report_analyzer::export::export;
use report_analyzer::ingestion::excel::load_excel_from_bytes;
use report_analyzer::ingestion::{load_bytes, LoadOptions, ReportFormat, DEFAULT_NA_VALUES};
use report_analyzer::types::{DataType, Value};
use report_analyzer::ReportError;
use rust_xlsxwriter::Workbook;

fn na() -> Vec<String> {
    DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect()
}

/// Two sheets; `Results` starts with a blank row and has a blank row between data rows.
fn workbook_bytes() -> Vec<u8> {
    let mut wb = Workbook::new();

    let notes = wb.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "generated").unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("Results").unwrap();
    for (c, h) in ["ID", "Status", "Duration", "Automated"].iter().enumerate() {
        ws.write_string(1, c as u16, *h).unwrap();
    }
    ws.write_number(2, 0, 1.0).unwrap();
    ws.write_string(2, 1, "Pass").unwrap();
    ws.write_number(2, 2, 1.5).unwrap();
    ws.write_boolean(2, 3, true).unwrap();

    ws.write_number(4, 0, 2.0).unwrap();
    ws.write_string(4, 1, "Fail").unwrap();
    ws.write_string(4, 2, "N/A").unwrap();
    ws.write_boolean(4, 3, false).unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn named_sheet_skips_blank_rows_and_infers_types() {
    let ds = load_excel_from_bytes(&workbook_bytes(), Some("Results"), &na()).unwrap();

    assert_eq!(ds.column_names(), vec!["ID", "Status", "Duration", "Automated"]);
    assert_eq!(ds.row_count(), 2);
    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![DataType::Int64, DataType::Utf8, DataType::Float64, DataType::Bool]
    );
    assert_eq!(
        ds.rows[1],
        vec![
            Value::Int64(2),
            Value::Utf8("Fail".to_string()),
            Value::Null,
            Value::Bool(false),
        ]
    );
}

#[test]
fn first_sheet_is_the_default() {
    let ds = load_excel_from_bytes(&workbook_bytes(), None, &na()).unwrap();
    assert_eq!(ds.column_names(), vec!["generated"]);
    assert_eq!(ds.row_count(), 0);
}

#[test]
fn missing_sheet_is_an_excel_error() {
    let err = load_excel_from_bytes(&workbook_bytes(), Some("Summary"), &na()).unwrap_err();
    assert!(matches!(err, ReportError::Excel(_)));
}

#[test]
fn load_options_select_the_sheet() {
    let opts = LoadOptions {
        sheet_name: Some("Results".to_string()),
        ..Default::default()
    };
    let ds = load_bytes(&workbook_bytes(), "run.xlsx", &opts).unwrap();
    assert_eq!(ds.row_count(), 2);
}

#[test]
fn exported_workbook_loads_back_unchanged() {
    let csv = b"ID,Status,Duration,Automated\n1,Pass,1.5,true\n2,Fail,,false\n";
    let ds = load_bytes(csv, "run.csv", &LoadOptions::default()).unwrap();

    let artifact = export(&ds, ReportFormat::Excel, "run.csv").unwrap();
    assert_eq!(artifact.file_name, "run.xlsx");
    assert_eq!(
        artifact.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let back = load_excel_from_bytes(&artifact.bytes, Some(SHEET_NAME), &na()).unwrap();
    assert_eq!(back, ds);
}
