//! `report-analyzer` loads tabular test reports (CSV / Excel) into an in-memory
//! [`types::DataSet`], applies light cleaning, summarizes and filters them, and exports the
//! result back to CSV or Excel bytes.
//!
//! The primary entrypoint is [`pipeline::process_upload`] (or [`pipeline::process_uploads`]
//! for a batch), which runs one file through:
//!
//! 1. **load** ([`ingestion`]): format from the file extension, column types inferred
//! 2. **clean** ([`processing::clean()`]): optional duplicate removal and mean-fill
//! 3. **summarize** ([`processing::summarize_status()`]): counts of the `Status` column
//! 4. **filter** ([`processing::filter_by_security_level()`]): keep selected `Security Level`s
//! 5. **project** ([`processing::project()`]): keep a chosen, ordered set of columns
//! 6. **export** ([`export::export()`]): CSV or single-sheet `.xlsx` bytes ready for download
//!
//! Every stage is also usable on its own.
//!
//! ## What you can load
//!
//! - **CSV**: `.csv`
//! - **Excel** (cargo feature `excel`, on by default): `.xlsx`, `.xlsm`, `.xls`, `.xlsb`
//!
//! Column types are inferred per column: [`types::DataType::Int64`],
//! [`types::DataType::Float64`], [`types::DataType::Bool`] or [`types::DataType::Utf8`].
//! Blank cells and common NA tokens (`NA`, `N/A`, `null`, `NaN`, ...) load as
//! [`types::Value::Null`].
//!
//! ## Quick example
//!
//! ```rust
//! use report_analyzer::ingestion::{load_bytes, LoadOptions, ReportFormat};
//! use report_analyzer::processing::{clean, summarize_status, CleanOptions};
//! use report_analyzer::export::export;
//!
//! # fn main() -> Result<(), report_analyzer::ReportError> {
//! let csv = b"ID,Status,Score\n1,Pass,90\n2,Fail,\n1,Pass,90\n";
//! let ds = load_bytes(csv, "run.csv", &LoadOptions::default())?;
//!
//! let cleaned = clean(&ds, &CleanOptions { remove_duplicates: true, fill_missing: true });
//! assert_eq!(cleaned.row_count(), 2);
//!
//! let counts = summarize_status(&cleaned).expect("has a Status column");
//! assert_eq!(counts.get("Pass"), Some(1));
//!
//! let out = export(&cleaned, ReportFormat::Csv, "run.csv")?;
//! assert_eq!(out.bytes, b"ID,Status,Score\n1,Pass,90.0\n2,Fail,90.0\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading entrypoints, format detection, load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: cleaning, summary, filter, projection, reductions
//! - [`export`]: CSV / Excel serialization
//! - [`pipeline`]: per-file stage wiring, run configuration, stage observers
//! - [`error`]: the error type shared by all of the above

pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{ReportError, ReportResult};
