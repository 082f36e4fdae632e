//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_upload`] / [`load_bytes`] (from [`unified`]) which:
//!
//! - detect the format from the file name's extension (or you can override via [`LoadOptions`])
//! - load into an in-memory [`crate::types::DataSet`], inferring column types
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub(crate) mod infer;
pub mod observability;
pub mod unified;

pub use infer::DEFAULT_NA_VALUES;
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    LogObserver,
};
pub use unified::{infer_format_from_name, load_bytes, load_upload, LoadOptions, ReportFormat, Upload};
