use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReportResult;
use crate::ingestion::ReportFormat;
use crate::processing::CleanOptions;

/// Rows shown in a file preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// User choices for one file: the state of its cleaning toggles, filter and column pickers,
/// chart toggle and conversion format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSelections {
    pub remove_duplicates: bool,
    pub fill_missing: bool,
    /// `Security Level` values to keep, by display label. Empty means no filter.
    pub security_levels: Vec<String>,
    /// Columns to keep, in order. `None` keeps every column.
    pub columns: Option<Vec<String>>,
    /// Conversion target. `None` skips export.
    pub export: Option<ReportFormat>,
    /// Include pie slices for the status summary.
    pub show_pie: bool,
    pub preview_rows: usize,
}

impl Default for FileSelections {
    fn default() -> Self {
        Self {
            remove_duplicates: false,
            fill_missing: false,
            security_levels: Vec::new(),
            columns: None,
            export: None,
            show_pie: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl FileSelections {
    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            remove_duplicates: self.remove_duplicates,
            fill_missing: self.fill_missing,
        }
    }
}

/// Selections for a whole run: defaults plus per-file entries keyed by uploaded file name.
///
/// A per-file entry replaces the defaults for that file entirely.
///
/// ```
/// use report_analyzer::pipeline::RunConfig;
/// use report_analyzer::ingestion::ReportFormat;
///
/// let cfg = RunConfig::from_json_str(r#"{
///     "defaults": { "remove_duplicates": true, "export": "csv" },
///     "files": { "q3.xlsx": { "security_levels": ["High"], "export": "excel" } }
/// }"#).unwrap();
/// assert!(cfg.selections_for("q2.csv").remove_duplicates);
/// assert_eq!(cfg.selections_for("q3.xlsx").export, Some(ReportFormat::Excel));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub defaults: FileSelections,
    pub files: BTreeMap<String, FileSelections>,
}

impl RunConfig {
    /// Parse a run config from JSON text.
    pub fn from_json_str(text: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON run config file.
    pub fn from_path(path: impl AsRef<Path>) -> ReportResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Selections that apply to `file_name`.
    pub fn selections_for(&self, file_name: &str) -> &FileSelections {
        self.files.get(file_name).unwrap_or(&self.defaults)
    }
}
