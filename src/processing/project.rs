//! Column projection for [`crate::types::DataSet`].

use crate::error::{ReportError, ReportResult};
use crate::types::{DataSet, Schema, Value};

/// Returns a dataset with exactly `columns`, in that order.
///
/// - Repeated names keep their first occurrence only.
/// - A name that is not in the schema is [`ReportError::ColumnNotFound`].
/// - An empty selection yields a dataset with no columns and the same number of rows.
pub fn project<S: AsRef<str>>(dataset: &DataSet, columns: &[S]) -> ReportResult<DataSet> {
    let mut idxs: Vec<usize> = Vec::with_capacity(columns.len());
    for name in columns {
        let name = name.as_ref();
        let idx = dataset
            .schema
            .index_of(name)
            .ok_or_else(|| ReportError::ColumnNotFound {
                column: name.to_string(),
                available: dataset.column_names(),
            })?;
        if !idxs.contains(&idx) {
            idxs.push(idx);
        }
    }

    let fields = idxs.iter().map(|&i| dataset.schema.fields[i].clone()).collect();
    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            idxs.iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}
