//! Unified loading entrypoint.
//!
//! Most callers should use [`load_upload`] (or [`load_bytes`]), which loads an uploaded file
//! into an in-memory [`crate::types::DataSet`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file name's
//!   extension. Anything other than CSV or Excel is [`ReportError::UnsupportedFileType`].
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::types::DataSet;

use super::csv;
use super::infer::DEFAULT_NA_VALUES;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported report file formats, for both loading and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    #[serde(alias = "xlsx")]
    Excel,
}

impl ReportFormat {
    /// Parse a format from a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Extension written on exported files (with the leading dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Excel => ".xlsx",
        }
    }

    /// MIME type declared for exported files.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("CSV"),
            Self::Excel => f.write_str("Excel"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            other => Err(format!("unknown format '{other}' (expected csv or excel)")),
        }
    }
}

/// One uploaded file: its name (used for format detection and export naming) and content.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name as uploaded, e.g. `report.csv`.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload from a name and its bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Content size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Content size in KiB, as shown in file details.
    pub fn size_kb(&self) -> f64 {
        kib(self.bytes.len())
    }
}

pub(crate) fn kib(size_bytes: usize) -> f64 {
    size_bytes as f64 / 1024.0
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("name", &self.name)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Options controlling loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, detect the format from the file extension.
    pub format: Option<ReportFormat>,
    /// Excel sheet to read; `None` reads the first sheet.
    pub sheet_name: Option<String>,
    /// Cell tokens loaded as missing values.
    pub na_values: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet_name", &self.sheet_name)
            .field("na_values_len", &self.na_values.len())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet_name: None,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Load an [`Upload`]; see [`load_bytes`].
pub fn load_upload(upload: &Upload, options: &LoadOptions) -> ReportResult<DataSet> {
    load_bytes(&upload.bytes, &upload.name, options)
}

/// Unified loading entry point for uploaded content.
///
/// - If `options.format` is `None`, the format is inferred from `file_name`'s extension.
/// - Column names come from the header row; column types are inferred from the cells.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure (including unsupported file types), with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```
/// use report_analyzer::ingestion::{load_bytes, LoadOptions};
/// use report_analyzer::types::Value;
///
/// # fn main() -> Result<(), report_analyzer::ReportError> {
/// let csv = b"ID,Status\n1,Pass\n2,Fail\n";
/// let ds = load_bytes(csv, "report.csv", &LoadOptions::default())?;
/// assert_eq!(ds.row_count(), 2);
/// assert_eq!(ds.rows[1][1], Value::Utf8("Fail".to_string()));
/// # Ok(())
/// # }
/// ```
///
/// Unsupported extensions are rejected without reading the content:
///
/// ```
/// use report_analyzer::ingestion::{load_bytes, LoadOptions};
/// use report_analyzer::ReportError;
///
/// let err = load_bytes(b"hello", "report.txt", &LoadOptions::default()).unwrap_err();
/// assert!(matches!(err, ReportError::UnsupportedFileType { .. }));
/// ```
pub fn load_bytes(bytes: &[u8], file_name: &str, options: &LoadOptions) -> ReportResult<DataSet> {
    let format = match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_name(file_name),
    };

    let ctx = IngestionContext {
        file_name: file_name.to_string(),
        size_bytes: bytes.len(),
        format: format.as_ref().ok().copied(),
    };

    let result = format.and_then(|fmt| match fmt {
        ReportFormat::Csv => csv::load_csv_from_bytes(bytes, &options.na_values),
        ReportFormat::Excel => load_excel_dispatch(bytes, options),
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &ReportError) -> IngestionSeverity {
    match e {
        ReportError::Io(_) => IngestionSeverity::Critical,
        ReportError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        _ => IngestionSeverity::Error,
    }
}

/// Detect the format from a file name's extension.
pub fn infer_format_from_name(file_name: &str) -> ReportResult<ReportFormat> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    ReportFormat::from_extension(ext).ok_or_else(|| ReportError::UnsupportedFileType {
        file_name: file_name.to_string(),
        extension: if ext.is_empty() {
            String::new()
        } else {
            format!(".{}", ext.to_ascii_lowercase())
        },
    })
}

fn load_excel_dispatch(bytes: &[u8], options: &LoadOptions) -> ReportResult<DataSet> {
    // Avoid unused warnings when the feature is off.
    let _ = (bytes, options);

    #[cfg(feature = "excel")]
    {
        super::excel::load_excel_from_bytes(bytes, options.sheet_name.as_deref(), &options.na_values)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(ReportError::FeatureDisabled { feature: "excel" })
    }
}
