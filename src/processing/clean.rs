//! Data cleaning: duplicate removal and mean-fill of missing numeric cells.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{DataSet, DataType, Value};

use super::reduce::mean;

/// Which cleaning operations to apply. Both run in field order when enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Drop rows that exactly repeat an earlier row.
    pub remove_duplicates: bool,
    /// Replace missing numeric cells with their column mean.
    pub fill_missing: bool,
}

/// One column touched by [`fill_missing_with_mean`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFill {
    pub column: String,
    /// Mean of the column's values before filling.
    pub mean: f64,
    pub cells_filled: usize,
}

/// Outcome of [`fill_missing_with_mean`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FillReport {
    /// Columns that had missing cells and were filled.
    pub filled: Vec<ColumnFill>,
    /// Numeric columns with missing cells but no values to average; left untouched.
    pub skipped_columns: Vec<String>,
}

/// Outcome of [`clean_in_place`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanReport {
    pub duplicates_removed: usize,
    pub fill: FillReport,
}

/// Returns a cleaned copy of `dataset`.
pub fn clean(dataset: &DataSet, options: &CleanOptions) -> DataSet {
    let mut out = dataset.clone();
    clean_in_place(&mut out, options);
    out
}

/// Applies the enabled cleaning operations to `dataset` and reports what changed.
pub fn clean_in_place(dataset: &mut DataSet, options: &CleanOptions) -> CleanReport {
    let mut report = CleanReport::default();
    if options.remove_duplicates {
        report.duplicates_removed = remove_duplicates(dataset);
    }
    if options.fill_missing {
        report.fill = fill_missing_with_mean(dataset);
    }
    report
}

/// Hashable view of a cell. Floats compare by value with `-0.0 == 0.0` and all NaNs equal.
#[derive(Hash, PartialEq, Eq)]
enum CellKey<'a> {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Utf8(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(v: &'a Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Int64(i) => Self::Int(*i),
            Value::Float64(f) if f.is_nan() => Self::Float(f64::NAN.to_bits()),
            Value::Float64(f) if *f == 0.0 => Self::Float(0.0_f64.to_bits()),
            Value::Float64(f) => Self::Float(f.to_bits()),
            Value::Bool(b) => Self::Bool(*b),
            Value::Utf8(s) => Self::Utf8(s.as_str()),
        }
    }
}

/// Removes rows identical in every column to an earlier row, keeping first occurrences in
/// order. Returns the number of rows removed.
pub fn remove_duplicates(dataset: &mut DataSet) -> usize {
    let keep: Vec<bool> = {
        let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.rows.len());
        dataset
            .rows
            .iter()
            .map(|row| seen.insert(row.iter().map(CellKey::from).collect()))
            .collect()
    };

    let before = dataset.rows.len();
    let mut keep = keep.into_iter();
    dataset.rows.retain(|_| keep.next().unwrap_or(true));
    before - dataset.rows.len()
}

/// Fills missing cells of every numeric column with that column's mean.
///
/// The mean is computed once per column from the values present before filling. `Int64`
/// columns that receive fills become `Float64`. Columns with no values are skipped.
pub fn fill_missing_with_mean(dataset: &mut DataSet) -> FillReport {
    let mut report = FillReport::default();

    for idx in 0..dataset.schema.fields.len() {
        let field = &dataset.schema.fields[idx];
        if !field.data_type.is_numeric() {
            continue;
        }
        let missing = dataset
            .rows
            .iter()
            .filter(|row| row.get(idx).is_none_or(Value::is_null))
            .count();
        if missing == 0 {
            continue;
        }

        let Some(column_mean) = mean(dataset.rows.iter().filter_map(|row| row.get(idx))) else {
            report.skipped_columns.push(field.name.clone());
            continue;
        };
        let column = field.name.clone();

        for row in &mut dataset.rows {
            if let Some(cell) = row.get_mut(idx) {
                *cell = match &*cell {
                    Value::Null => Value::Float64(column_mean),
                    Value::Int64(v) => Value::Float64(*v as f64),
                    other => other.clone(),
                };
            }
        }
        dataset.schema.fields[idx].data_type = DataType::Float64;

        report.filled.push(ColumnFill {
            column,
            mean: column_mean,
            cells_filled: missing,
        });
    }

    report
}
