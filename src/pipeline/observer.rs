use std::sync::Mutex;

use crate::ingestion::ReportFormat;

/// Stage events emitted by the pipeline for one file.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    FileStarted { size_bytes: usize },
    DuplicatesRemoved { removed: usize, remaining: usize },
    ColumnFilled { column: String, mean: f64, cells: usize },
    FillSkipped { column: String },
    StatusSummarized { categories: usize, total: usize },
    Filtered { selected: usize, rows_before: usize, rows_after: usize },
    UnknownSecurityLevel { label: String },
    Projected { columns: usize },
    Exported { file_name: String, format: ReportFormat, bytes: usize },
    StageFailed { stage: &'static str, message: String },
    FileFinished { rows: usize, columns: usize },
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, file_name: &str, event: &PipelineEvent);
}

/// Emits pipeline events through the `log` facade (target `report_analyzer::pipeline`).
#[derive(Debug, Default)]
pub struct LogPipelineObserver;

const LOG_TARGET: &str = "report_analyzer::pipeline";

impl PipelineObserver for LogPipelineObserver {
    fn on_event(&self, file_name: &str, event: &PipelineEvent) {
        match event {
            PipelineEvent::FillSkipped { column } => {
                log::debug!(target: LOG_TARGET, "file={file_name} mean undefined, column '{column}' left unfilled");
            }
            PipelineEvent::UnknownSecurityLevel { label } => {
                log::warn!(target: LOG_TARGET, "file={file_name} security level '{label}' not present, ignored");
            }
            PipelineEvent::StageFailed { stage, message } => {
                log::warn!(target: LOG_TARGET, "file={file_name} stage={stage} failed: {message}");
            }
            PipelineEvent::FileStarted { .. } => {
                log::debug!(target: LOG_TARGET, "file={file_name} {event:?}");
            }
            other => log::info!(target: LOG_TARGET, "file={file_name} {other:?}"),
        }
    }
}

/// Keeps every event in memory, in order. Useful for tests and for rendering a run log.
#[derive(Debug, Default)]
pub struct RecordingPipelineObserver {
    events: Mutex<Vec<(String, PipelineEvent)>>,
}

impl RecordingPipelineObserver {
    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<(String, PipelineEvent)> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl PipelineObserver for RecordingPipelineObserver {
    fn on_event(&self, file_name: &str, event: &PipelineEvent) {
        if let Ok(mut g) = self.events.lock() {
            g.push((file_name.to_string(), event.clone()));
        }
    }
}
