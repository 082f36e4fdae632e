//! CSV export.

use crate::error::{ReportError, ReportResult};
use crate::types::DataSet;

/// Serialize `dataset` as CSV: header row, then one line per row, `\n` terminated.
///
/// No index column is written. Missing values are empty fields; see
/// [`crate::types::Value`]'s `Display` for cell formatting. A dataset without columns
/// produces an empty buffer.
pub fn write_csv_to_vec(dataset: &DataSet) -> ReportResult<Vec<u8>> {
    if dataset.schema.is_empty() {
        return Ok(Vec::new());
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }

    wtr.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::write_csv_to_vec;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn writes_header_and_typed_cells() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("ID", DataType::Int64),
                Field::new("Score", DataType::Float64),
                Field::new("Ok", DataType::Bool),
                Field::new("Note", DataType::Utf8),
            ]),
            vec![
                vec![
                    Value::Int64(1),
                    Value::Float64(2.0),
                    Value::Bool(true),
                    Value::Utf8("a, b".into()),
                ],
                vec![Value::Int64(2), Value::Null, Value::Bool(false), Value::Null],
            ],
        );
        let out = String::from_utf8(write_csv_to_vec(&ds).unwrap()).unwrap();
        assert_eq!(out, "ID,Score,Ok,Note\n1,2.0,True,\"a, b\"\n2,,False,\n");
    }

    #[test]
    fn zero_columns_write_nothing() {
        let ds = DataSet::new(Schema::default(), vec![vec![], vec![]]);
        assert!(write_csv_to_vec(&ds).unwrap().is_empty());
    }
}
