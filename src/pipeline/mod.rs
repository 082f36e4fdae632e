//! Per-file pipeline: load → clean → summarize → filter → project → export.
//!
//! Each call is a fresh, self-contained pass: inputs are the uploaded files and the user's
//! [`FileSelections`]; nothing carries over between calls or between files.
//!
//! ```
//! use report_analyzer::ingestion::{ReportFormat, Upload};
//! use report_analyzer::pipeline::{process_upload, FileSelections, PipelineOptions};
//!
//! let upload = Upload::new(
//!     "report.csv",
//!     "ID,Status,Security Level\n1,Pass,High\n2,Fail,Low\n1,Pass,High\n",
//! );
//! let selections = FileSelections {
//!     remove_duplicates: true,
//!     security_levels: vec!["High".to_string()],
//!     columns: Some(vec!["ID".to_string(), "Status".to_string()]),
//!     export: Some(ReportFormat::Csv),
//!     ..Default::default()
//! };
//!
//! let report = process_upload(&upload, &selections, &PipelineOptions::default());
//! let file = report.processed().unwrap();
//! assert_eq!(file.clean.duplicates_removed, 1);
//! assert_eq!(file.filtered_rows, Some(1));
//! assert_eq!(file.export.as_ref().unwrap().bytes, b"ID,Status\n1,Pass\n");
//! ```

mod config;
mod observer;

use std::fmt;
use std::sync::Arc;

use crate::error::ReportError;
use crate::export::{export as export_dataset, ExportArtifact};
use crate::ingestion::unified::kib;
use crate::ingestion::{load_upload, LoadOptions, Upload};
use crate::processing::{
    clean_in_place, filter_by_security_level, project, security_levels, summarize_status, CleanReport,
    StatusCount,
};
use crate::types::{DataSet, Value};

pub use config::{FileSelections, RunConfig, DEFAULT_PREVIEW_ROWS};
pub use observer::{LogPipelineObserver, PipelineEvent, PipelineObserver, RecordingPipelineObserver};

/// Options shared by every file in a run.
#[derive(Clone, Default)]
pub struct PipelineOptions {
    /// Loader options (NA tokens, sheet, load observer).
    pub load: LoadOptions,
    /// Optional observer for stage events.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("load", &self.load)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl PipelineOptions {
    fn emit(&self, file_name: &str, event: PipelineEvent) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_event(file_name, &event);
        }
    }
}

/// Result of running the pipeline on one loaded file.
#[derive(Debug)]
pub struct ProcessedFile {
    /// First rows of the file as loaded, before any cleaning.
    pub preview: DataSet,
    pub clean: CleanReport,
    /// `Status` counts after cleaning; `None` without a `Status` column.
    pub status_counts: Option<StatusCount>,
    /// Whether pie slices were requested for the status summary.
    pub show_pie: bool,
    /// Distinct `Security Level` values offered for filtering; `None` without that column.
    pub security_levels: Option<Vec<Value>>,
    /// Row count after the security-level filter, when one was applied.
    pub filtered_rows: Option<usize>,
    /// Final dataset after all stages.
    pub dataset: DataSet,
    pub export: Option<ExportArtifact>,
    /// Non-fatal stage failures (projection, export). The failed stage was skipped.
    pub issues: Vec<ReportError>,
}

/// How a file's run ended.
#[derive(Debug)]
pub enum FileOutcome {
    Processed(Box<ProcessedFile>),
    /// The file could not be loaded; no dataset was produced.
    Failed(ReportError),
}

/// Per-file result of a run.
#[derive(Debug)]
pub struct FileReport {
    pub file_name: String,
    pub size_bytes: usize,
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Size in KiB, as shown in file details.
    pub fn size_kb(&self) -> f64 {
        kib(self.size_bytes)
    }

    pub fn processed(&self) -> Option<&ProcessedFile> {
        match &self.outcome {
            FileOutcome::Processed(p) => Some(&**p),
            FileOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ReportError> {
        match &self.outcome {
            FileOutcome::Processed(_) => None,
            FileOutcome::Failed(e) => Some(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, FileOutcome::Processed(_))
    }
}

/// Runs every upload through the pipeline in order, picking selections from `config`.
///
/// A file that fails never stops the run; its report carries the error.
pub fn process_uploads(uploads: &[Upload], config: &RunConfig, options: &PipelineOptions) -> Vec<FileReport> {
    uploads
        .iter()
        .map(|upload| process_upload(upload, config.selections_for(&upload.name), options))
        .collect()
}

/// Runs one upload through load → clean → summarize → filter → project → export.
pub fn process_upload(upload: &Upload, selections: &FileSelections, options: &PipelineOptions) -> FileReport {
    let name = upload.name.as_str();
    options.emit(
        name,
        PipelineEvent::FileStarted {
            size_bytes: upload.size_bytes(),
        },
    );

    let outcome = match load_upload(upload, &options.load) {
        Ok(dataset) => FileOutcome::Processed(Box::new(run_stages(name, dataset, selections, options))),
        Err(e) => {
            options.emit(
                name,
                PipelineEvent::StageFailed {
                    stage: "load",
                    message: e.to_string(),
                },
            );
            FileOutcome::Failed(e)
        }
    };

    FileReport {
        file_name: upload.name.clone(),
        size_bytes: upload.size_bytes(),
        outcome,
    }
}

fn run_stages(
    name: &str,
    mut dataset: DataSet,
    selections: &FileSelections,
    options: &PipelineOptions,
) -> ProcessedFile {
    let preview = dataset.head(selections.preview_rows);
    let mut issues = Vec::new();

    let clean = clean_in_place(&mut dataset, &selections.clean_options());
    if selections.remove_duplicates {
        options.emit(
            name,
            PipelineEvent::DuplicatesRemoved {
                removed: clean.duplicates_removed,
                remaining: dataset.row_count(),
            },
        );
    }
    for fill in &clean.fill.filled {
        options.emit(
            name,
            PipelineEvent::ColumnFilled {
                column: fill.column.clone(),
                mean: fill.mean,
                cells: fill.cells_filled,
            },
        );
    }
    for column in &clean.fill.skipped_columns {
        options.emit(name, PipelineEvent::FillSkipped { column: column.clone() });
    }

    let status_counts = summarize_status(&dataset);
    if let Some(counts) = &status_counts {
        options.emit(
            name,
            PipelineEvent::StatusSummarized {
                categories: counts.entries.len(),
                total: counts.total(),
            },
        );
    }

    let levels = security_levels(&dataset);
    let mut filtered_rows = None;
    if let Some(available) = &levels {
        let selected = resolve_levels(name, available, &selections.security_levels, options);
        if !selected.is_empty() {
            let rows_before = dataset.row_count();
            dataset = filter_by_security_level(&dataset, &selected);
            filtered_rows = Some(dataset.row_count());
            options.emit(
                name,
                PipelineEvent::Filtered {
                    selected: selected.len(),
                    rows_before,
                    rows_after: dataset.row_count(),
                },
            );
        }
    }

    if let Some(columns) = &selections.columns {
        match project(&dataset, columns) {
            Ok(projected) => {
                dataset = projected;
                options.emit(
                    name,
                    PipelineEvent::Projected {
                        columns: dataset.column_count(),
                    },
                );
            }
            Err(e) => {
                options.emit(
                    name,
                    PipelineEvent::StageFailed {
                        stage: "project",
                        message: e.to_string(),
                    },
                );
                issues.push(e);
            }
        }
    }

    let export = match selections.export {
        Some(format) => match export_dataset(&dataset, format, name) {
            Ok(artifact) => {
                options.emit(
                    name,
                    PipelineEvent::Exported {
                        file_name: artifact.file_name.clone(),
                        format,
                        bytes: artifact.len(),
                    },
                );
                Some(artifact)
            }
            Err(e) => {
                options.emit(
                    name,
                    PipelineEvent::StageFailed {
                        stage: "export",
                        message: e.to_string(),
                    },
                );
                issues.push(e);
                None
            }
        },
        None => None,
    };

    options.emit(
        name,
        PipelineEvent::FileFinished {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
        },
    );

    ProcessedFile {
        preview,
        clean,
        status_counts,
        show_pie: selections.show_pie,
        security_levels: levels,
        filtered_rows,
        dataset,
        export,
        issues,
    }
}

/// Maps selected labels onto the distinct values present; unknown labels are reported and dropped.
fn resolve_levels(name: &str, available: &[Value], labels: &[String], options: &PipelineOptions) -> Vec<Value> {
    let mut selected = Vec::with_capacity(labels.len());
    for label in labels {
        match available.iter().find(|v| v.to_string() == *label) {
            Some(v) if !selected.contains(v) => selected.push(v.clone()),
            Some(_) => {}
            None => options.emit(name, PipelineEvent::UnknownSecurityLevel { label: label.clone() }),
        }
    }
    selected
}
