//! Column type inference shared by the CSV and Excel loaders.
//!
//! Loaders classify each cell into a [`RawCell`], collect them column-wise, and then call
//! [`build_dataset`] which picks one [`DataType`] per column and converts the cells.

use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell tokens treated as missing values (in addition to blank cells).
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A classified cell, keeping its original text for columns that end up as [`DataType::Utf8`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Missing,
    Int(i64, String),
    Float(f64, String),
    Bool(bool, String),
    Text(String),
}

impl RawCell {
    /// Classify a text token (CSV field or Excel string cell).
    pub(crate) fn from_text(raw: &str, na_values: &[String]) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || na_values.iter().any(|na| na == trimmed) {
            return Self::Missing;
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Self::Int(v, trimmed.to_owned());
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Self::Float(v, trimmed.to_owned());
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => Self::Bool(true, trimmed.to_owned()),
            "false" => Self::Bool(false, trimmed.to_owned()),
            _ => Self::Text(trimmed.to_owned()),
        }
    }

    fn into_value(self, data_type: DataType) -> Value {
        match (self, data_type) {
            (Self::Missing, _) => Value::Null,
            (Self::Int(v, _), DataType::Int64) => Value::Int64(v),
            (Self::Int(v, _), DataType::Float64) => Value::Float64(v as f64),
            (Self::Float(v, _), DataType::Float64) => Value::Float64(v),
            (Self::Bool(v, _), DataType::Bool) => Value::Bool(v),
            (Self::Int(_, s) | Self::Float(_, s) | Self::Bool(_, s) | Self::Text(s), _) => Value::Utf8(s),
        }
    }
}

/// Pick the narrowest type that every non-missing cell in the column fits.
///
/// A column with no values at all is `Float64` so it stays eligible for mean-fill.
pub(crate) fn infer_column_type(cells: &[RawCell]) -> DataType {
    let mut saw_int = false;
    let mut saw_float = false;
    let mut saw_bool = false;
    let mut saw_text = false;
    for c in cells {
        match c {
            RawCell::Missing => {}
            RawCell::Int(..) => saw_int = true,
            RawCell::Float(..) => saw_float = true,
            RawCell::Bool(..) => saw_bool = true,
            RawCell::Text(_) => saw_text = true,
        }
    }

    let numeric = saw_int || saw_float;
    match (numeric, saw_bool, saw_text) {
        (false, false, false) => DataType::Float64,
        (true, false, false) if saw_float => DataType::Float64,
        (true, false, false) => DataType::Int64,
        (false, true, false) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

/// Turn raw header cells into unique column names.
///
/// Blank headers become `Unnamed: <index>`; repeats become `name.1`, `name.2`, ...
pub(crate) fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for (idx, h) in raw.into_iter().enumerate() {
        let base = match h.as_ref().trim() {
            "" => format!("Unnamed: {idx}"),
            name => name.to_owned(),
        };
        let mut candidate = base.clone();
        let mut n = 0usize;
        while out.contains(&candidate) {
            n += 1;
            candidate = format!("{base}.{n}");
        }
        out.push(candidate);
    }
    out
}

/// Build a [`DataSet`] from headers and column-major raw cells.
///
/// `columns.len()` must equal `headers.len()` and all columns must have the same length.
pub(crate) fn build_dataset(headers: Vec<String>, columns: Vec<Vec<RawCell>>) -> DataSet {
    let row_count = columns.first().map(Vec::len).unwrap_or(0);
    let types: Vec<DataType> = columns.iter().map(|c| infer_column_type(c)).collect();

    let mut rows: Vec<Vec<Value>> = (0..row_count)
        .map(|_| Vec::with_capacity(headers.len()))
        .collect();
    for (col, &data_type) in columns.into_iter().zip(types.iter()) {
        for (row, cell) in rows.iter_mut().zip(col) {
            row.push(cell.into_value(data_type));
        }
    }

    let fields = headers
        .into_iter()
        .zip(types)
        .map(|(name, data_type)| Field::new(name, data_type))
        .collect();
    DataSet::new(Schema::new(fields), rows)
}
