//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by loading.
//! Every stage is optional and can be applied on its own:
//!
//! - [`clean()`]: duplicate removal and mean-fill of missing numeric cells
//! - [`summarize_status()`]: category counts of the `Status` column
//! - [`filter_by_security_level()`]: keep rows whose `Security Level` is selected
//! - [`project()`]: keep a chosen, ordered subset of columns
//! - [`reduce()`]: column reductions (count/sum/mean)
//!
//! ## Example: clean → summarize → filter → project
//!
//! ```rust
//! use report_analyzer::processing::{
//!     clean, filter_by_security_level, project, summarize_status, CleanOptions,
//! };
//! use report_analyzer::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("ID", DataType::Int64),
//!     Field::new("Status", DataType::Utf8),
//!     Field::new("Security Level", DataType::Utf8),
//! ]);
//! let row = |id, status: &str, level: &str| {
//!     vec![Value::Int64(id), Value::Utf8(status.into()), Value::Utf8(level.into())]
//! };
//! let ds = DataSet::new(
//!     schema,
//!     vec![row(1, "Pass", "High"), row(2, "Fail", "Low"), row(1, "Pass", "High")],
//! );
//!
//! let opts = CleanOptions { remove_duplicates: true, fill_missing: false };
//! let cleaned = clean(&ds, &opts);
//! assert_eq!(cleaned.row_count(), 2);
//!
//! let counts = summarize_status(&cleaned).unwrap();
//! assert_eq!(counts.get("Pass"), Some(1));
//! assert_eq!(counts.get("Fail"), Some(1));
//!
//! let high = filter_by_security_level(&cleaned, &[Value::Utf8("High".into())]);
//! let out = project(&high, &["ID", "Status"]).unwrap();
//! assert_eq!(out.rows, vec![vec![Value::Int64(1), Value::Utf8("Pass".into())]]);
//! ```

pub mod clean;
pub mod filter;
pub mod project;
pub mod reduce;
pub mod summary;

pub use clean::{
    clean, clean_in_place, fill_missing_with_mean, remove_duplicates, CleanOptions, CleanReport, ColumnFill,
    FillReport,
};
pub use filter::{
    distinct_values, filter, filter_by_security_level, filter_by_values, security_levels, SECURITY_LEVEL_COLUMN,
};
pub use project::project;
pub use reduce::{reduce, ReduceOp};
pub use summary::{summarize_status, value_counts, PieSlice, StatusCount, StatusEntry, STATUS_COLUMN};
