//! Export of a [`DataSet`] to downloadable CSV or Excel bytes.
//!
//! ```
//! use report_analyzer::export::export;
//! use report_analyzer::ingestion::{load_bytes, LoadOptions, ReportFormat};
//!
//! # fn main() -> Result<(), report_analyzer::ReportError> {
//! let ds = load_bytes(b"ID,Status\n1,Pass\n", "Report.CSV", &LoadOptions::default())?;
//! let artifact = export(&ds, ReportFormat::Csv, "Report.CSV")?;
//! assert_eq!(artifact.file_name, "Report.csv");
//! assert_eq!(artifact.mime_type, "text/csv");
//! assert_eq!(artifact.bytes, b"ID,Status\n1,Pass\n");
//! # Ok(())
//! # }
//! ```

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use crate::error::ReportResult;
use crate::ingestion::ReportFormat;
use crate::types::DataSet;

/// An in-memory export ready for download.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Serialized file content.
    pub bytes: Vec<u8>,
    /// Download name: the original name with its extension replaced.
    pub file_name: String,
    /// Declared content type.
    pub mime_type: &'static str,
    pub format: ReportFormat,
}

impl ExportArtifact {
    /// A reader over the full content, positioned at the start.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Serializes `dataset` in `format` and names the result after `original_name`.
pub fn export(dataset: &DataSet, format: ReportFormat, original_name: &str) -> ReportResult<ExportArtifact> {
    let bytes = match format {
        ReportFormat::Csv => csv::write_csv_to_vec(dataset)?,
        ReportFormat::Excel => write_excel_dispatch(dataset)?,
    };
    Ok(ExportArtifact {
        bytes,
        file_name: output_file_name(original_name, format),
        mime_type: format.mime_type(),
        format,
    })
}

/// Replaces the final extension of `original_name` with the format's extension.
///
/// `report.v2.CSV` becomes `report.v2.xlsx`; a name without an extension gains one.
pub fn output_file_name(original_name: &str, format: ReportFormat) -> String {
    let stem = match Path::new(original_name).extension() {
        Some(ext) => &original_name[..original_name.len() - ext.len() - 1],
        None => original_name,
    };
    format!("{stem}{}", format.extension())
}

fn write_excel_dispatch(dataset: &DataSet) -> ReportResult<Vec<u8>> {
    // Avoid unused warnings when the feature is off.
    let _ = dataset;

    #[cfg(feature = "excel")]
    {
        excel::write_xlsx_to_vec(dataset)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(crate::error::ReportError::FeatureDisabled { feature: "excel" })
    }
}
