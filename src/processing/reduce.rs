//! Column reductions for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count non-null values.
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Arithmetic mean of numeric values, ignoring nulls. Always a float.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - `Count` returns `Some(Value::Int64(non_null_count))` for any column type.
/// - `Sum` and `Mean` only look at numeric columns; a non-numeric column, or one with no
///   non-null values, reduces to `Some(Value::Null)`.
/// - `Sum` keeps the column type (`Int64` stays `Int64`); `Mean` is `Float64`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    let field = dataset.schema.fields.get(idx)?;
    let cells = dataset.rows.iter().filter_map(|row| row.get(idx));

    match op {
        ReduceOp::Count => Some(Value::Int64(cells.filter(|v| !v.is_null()).count() as i64)),
        _ if !field.data_type.is_numeric() => Some(Value::Null),
        ReduceOp::Sum => Some(sum(cells)),
        ReduceOp::Mean => Some(mean(cells).map(Value::Float64).unwrap_or(Value::Null)),
    }
}

fn sum<'a>(cells: impl Iterator<Item = &'a Value>) -> Value {
    let mut int_acc: Option<i64> = None;
    let mut float_acc: Option<f64> = None;
    for v in cells {
        match v {
            Value::Int64(i) => int_acc = Some(int_acc.unwrap_or(0).saturating_add(*i)),
            Value::Float64(f) => float_acc = Some(float_acc.unwrap_or(0.0) + f),
            _ => {}
        }
    }
    match (int_acc, float_acc) {
        (None, None) => Value::Null,
        (Some(i), None) => Value::Int64(i),
        (i, Some(f)) => Value::Float64(f + i.unwrap_or(0) as f64),
    }
}

/// Mean of the numeric values in `cells`, or `None` if there are none.
pub(crate) fn mean<'a>(cells: impl Iterator<Item = &'a Value>) -> Option<f64> {
    let (total, n) = cells
        .filter_map(Value::as_f64)
        .fold((0.0_f64, 0usize), |(total, n), v| (total + v, n + 1));
    (n > 0).then(|| total / n as f64)
}

#[cfg(test)]
mod tests {
    use super::{reduce, ReduceOp};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn numeric_dataset_with_nulls() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("score", DataType::Float64),
            Field::new("name", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Float64(10.0), Value::Utf8("a".to_string())],
            vec![Value::Int64(2), Value::Null, Value::Null],
            vec![Value::Int64(3), Value::Float64(5.5), Value::Utf8("c".to_string())],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn reduce_count_skips_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "score", ReduceOp::Count), Some(Value::Int64(2)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Count), Some(Value::Int64(3)));
        assert_eq!(reduce(&ds, "name", ReduceOp::Count), Some(Value::Int64(2)));
    }

    #[test]
    fn reduce_sum_ignores_nulls_and_preserves_type() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "score", ReduceOp::Sum), Some(Value::Float64(15.5)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Sum), Some(Value::Int64(6)));
    }

    #[test]
    fn reduce_mean_is_float_and_ignores_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "score", ReduceOp::Mean), Some(Value::Float64(7.75)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Mean), Some(Value::Float64(2.0)));
    }

    #[test]
    fn reduce_non_numeric_is_null_and_missing_column_is_none() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "name", ReduceOp::Mean), Some(Value::Null));
        assert_eq!(reduce(&ds, "missing", ReduceOp::Count), None);
    }

    #[test]
    fn reduce_numeric_returns_null_if_all_values_null() {
        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert_eq!(reduce(&ds, "score", ReduceOp::Sum), Some(Value::Null));
        assert_eq!(reduce(&ds, "score", ReduceOp::Mean), Some(Value::Null));
    }
}
