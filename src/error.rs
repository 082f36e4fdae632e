use thiserror::Error;

/// Convenience result type used across loading, processing and export.
pub type ReportResult<T> = Result<T, ReportError>;

/// Error type returned by report loading, projection, export and configuration.
///
/// Errors are always scoped to a single uploaded file; the pipeline records them on that
/// file's report and moves on to the next one.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Underlying I/O error (e.g. reading a config file, writing an export buffer).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be written (feature-gated behind `excel`).
    #[error("excel write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// CSV read/write error, including invalid UTF-8 input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Run configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The uploaded file's extension is not CSV or Excel.
    #[error("unsupported file type '{extension}' for '{file_name}'")]
    UnsupportedFileType { file_name: String, extension: String },

    /// The input parsed but cannot be turned into a table (no header, ragged rows, ...).
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// A column selection named a column that is not in the dataset.
    #[error("column '{column}' not found. columns={available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// The requested format needs a cargo feature that is not enabled.
    #[error("{feature} support not enabled (enable cargo feature '{feature}')")]
    FeatureDisabled { feature: &'static str },
}
