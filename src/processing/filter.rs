//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Name of the column that drives the security-level filter.
pub const SECURITY_LEVEL_COLUMN: &str = "Security Level";

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Distinct values of `column` in first-appearance order (missing included if present).
///
/// Returns `None` if the column does not exist.
pub fn distinct_values(dataset: &DataSet, column: &str) -> Option<Vec<Value>> {
    let mut out: Vec<Value> = Vec::new();
    for v in dataset.column(column)? {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    Some(out)
}

/// Distinct values of the `Security Level` column, or `None` if it is absent.
pub fn security_levels(dataset: &DataSet) -> Option<Vec<Value>> {
    distinct_values(dataset, SECURITY_LEVEL_COLUMN)
}

/// Keeps only rows whose `column` value is one of `selected`.
///
/// An empty selection, or a column that does not exist, leaves the dataset unchanged.
pub fn filter_by_values(dataset: &DataSet, column: &str, selected: &[Value]) -> DataSet {
    let Some(idx) = dataset.schema.index_of(column) else {
        return dataset.clone();
    };
    if selected.is_empty() {
        return dataset.clone();
    }
    filter(dataset, |row| row.get(idx).is_some_and(|v| selected.contains(v)))
}

/// Keeps only rows whose `Security Level` is one of `selected`; see [`filter_by_values`].
pub fn filter_by_security_level(dataset: &DataSet, selected: &[Value]) -> DataSet {
    filter_by_values(dataset, SECURITY_LEVEL_COLUMN, selected)
}
