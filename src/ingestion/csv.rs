//! CSV loading.

use crate::error::{ReportError, ReportResult};
use crate::types::DataSet;

use super::infer::{build_dataset, normalize_headers, RawCell};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load CSV bytes into an in-memory [`DataSet`], inferring one type per column.
///
/// Rules:
///
/// - The first record is the header row; a leading UTF-8 BOM is ignored.
/// - Blank lines are skipped; rows shorter than the header are padded with missing values.
/// - A row with more fields than the header is malformed input.
/// - Blank cells and any token in `na_values` load as [`crate::types::Value::Null`].
pub fn load_csv_from_bytes(bytes: &[u8], na_values: &[String]) -> ReportResult<DataSet> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    load_csv_from_reader(&mut rdr, na_values)
}

/// Load CSV data from an existing CSV reader (which must be configured with headers).
pub fn load_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    na_values: &[String],
) -> ReportResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ReportError::MalformedInput {
            message: "csv has no header row".to_string(),
        });
    }
    let names = normalize_headers(headers.iter());
    let width = names.len();

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::new(); width];
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users; +1 again because the header is row 1.
        let user_row = row_idx0 + 2;
        // Blank lines never reach here; a quoted `""` is a one-field record with a missing value.
        let record = result?;
        if record.len() > width {
            return Err(ReportError::MalformedInput {
                message: format!(
                    "row {user_row} has {} fields but the header has {width}",
                    record.len()
                ),
            });
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            column.push(RawCell::from_text(raw, na_values));
        }
    }

    Ok(build_dataset(names, columns))
}

#[cfg(test)]
mod tests {
    use super::load_csv_from_bytes;
    use crate::ingestion::infer::DEFAULT_NA_VALUES;
    use crate::types::{DataType, Value};

    fn na() -> Vec<String> {
        DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strips_bom_and_pads_short_rows() {
        let input = b"\xEF\xBB\xBFID,Status\n1,Pass\n2\n";
        let ds = load_csv_from_bytes(input, &na()).unwrap();
        assert_eq!(ds.column_names(), vec!["ID", "Status"]);
        assert_eq!(ds.rows[1], vec![Value::Int64(2), Value::Null]);
    }

    #[test]
    fn rejects_rows_wider_than_header() {
        let err = load_csv_from_bytes(b"a,b\n1,2,3\n", &na()).unwrap_err();
        assert!(err.to_string().contains("row 2 has 3 fields"));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = load_csv_from_bytes(b"", &na()).unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }

    #[test]
    fn blank_lines_are_skipped_but_empty_single_field_rows_are_kept() {
        let ds = load_csv_from_bytes(b"Duration\n1.5\n\n\"\"\n2.5\n", &na()).unwrap();
        assert_eq!(
            ds.rows,
            vec![
                vec![Value::Float64(1.5)],
                vec![Value::Null],
                vec![Value::Float64(2.5)],
            ]
        );
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let ds = load_csv_from_bytes(b"name,score\n\"Doe, J\",1.5\n", &na()).unwrap();
        assert_eq!(ds.rows[0][0], Value::Utf8("Doe, J".to_string()));
        assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
    }
}
