//! Category counts for the `Status` column (bar and pie views).

use serde::Serialize;

use crate::types::{DataSet, Value};

/// Name of the column that drives the status summary.
pub const STATUS_COLUMN: &str = "Status";

/// One category and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEntry {
    /// Display label of the category value.
    pub label: String,
    /// The category value as stored in the dataset.
    pub value: Value,
    pub count: usize,
}

/// One pie slice: a category's share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the total in `0.0..=1.0`.
    pub fraction: f64,
    /// Percentage formatted to one decimal place, e.g. `"66.7%"`.
    pub percent_label: String,
}

/// Counts of distinct non-missing values, by descending count.
///
/// Ties keep the order in which the values first appear in the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCount {
    pub entries: Vec<StatusEntry>,
}

impl StatusCount {
    /// Entries in display order; also the bar-chart magnitudes.
    pub fn bars(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Count for a label, if present.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pie view of the counts. Empty when there is nothing to count.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|e| {
                let fraction = e.count as f64 / total as f64;
                PieSlice {
                    label: e.label.clone(),
                    count: e.count,
                    fraction,
                    percent_label: format!("{:.1}%", fraction * 100.0),
                }
            })
            .collect()
    }
}

/// Counts the distinct non-missing values of `column`, or `None` if the column is absent.
pub fn value_counts(dataset: &DataSet, column: &str) -> Option<StatusCount> {
    let mut entries: Vec<StatusEntry> = Vec::new();
    for value in dataset.column(column)? {
        if value.is_null() {
            continue;
        }
        match entries.iter_mut().find(|e| &e.value == value) {
            Some(entry) => entry.count += 1,
            None => entries.push(StatusEntry {
                label: value.to_string(),
                value: value.clone(),
                count: 1,
            }),
        }
    }
    // Stable sort: ties stay in first-appearance order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    Some(StatusCount { entries })
}

/// Summarizes the `Status` column, or `None` if the dataset has no such column.
pub fn summarize_status(dataset: &DataSet) -> Option<StatusCount> {
    value_counts(dataset, STATUS_COLUMN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn statuses(values: &[Option<&str>]) -> DataSet {
        DataSet::new(
            Schema::new(vec![Field::new("Status", DataType::Utf8)]),
            values
                .iter()
                .map(|v| vec![v.map_or(Value::Null, |s| Value::Utf8(s.to_string()))])
                .collect(),
        )
    }

    #[test]
    fn counts_order_by_descending_count_then_first_appearance() {
        let ds = statuses(&[Some("Fail"), Some("Pass"), Some("Skip"), Some("Pass"), None]);
        let counts = summarize_status(&ds).unwrap();
        let labels: Vec<&str> = counts.bars().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Pass", "Fail", "Skip"]);
        assert_eq!(counts.get("Pass"), Some(2));
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn missing_status_column_is_inactive() {
        let ds = DataSet::new(Schema::new(vec![Field::new("ID", DataType::Int64)]), vec![]);
        assert!(summarize_status(&ds).is_none());
    }

    #[test]
    fn pie_labels_use_one_decimal() {
        let ds = statuses(&[Some("Pass"), Some("Pass"), Some("Fail")]);
        let slices = summarize_status(&ds).unwrap().pie_slices();
        assert_eq!(slices[0].percent_label, "66.7%");
        assert_eq!(slices[1].percent_label, "33.3%");
    }

    #[test]
    fn pie_of_empty_counts_is_empty() {
        let ds = statuses(&[None, None]);
        let counts = summarize_status(&ds).unwrap();
        assert!(counts.is_empty());
        assert!(counts.pie_slices().is_empty());
    }

    #[test]
    fn numeric_categories_use_display_labels() {
        let ds = DataSet::new(
            Schema::new(vec![Field::new("code", DataType::Int64)]),
            vec![vec![Value::Int64(200)], vec![Value::Int64(404)], vec![Value::Int64(200)]],
        );
        let counts = value_counts(&ds, "code").unwrap();
        assert_eq!(counts.get("200"), Some(2));
        assert_eq!(counts.entries[0].value, Value::Int64(200));
    }
}
