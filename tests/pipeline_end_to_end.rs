use std::sync::Arc;

use report_analyzer::ingestion::{ReportFormat, Upload};
use report_analyzer::pipeline::{
    process_upload, process_uploads, FileSelections, PipelineEvent, PipelineOptions, RecordingPipelineObserver,
    RunConfig,
};
use report_analyzer::types::Value;
use report_analyzer::ReportError;

fn report_upload() -> Upload {
    Upload::new("report.csv", std::fs::read("tests/fixtures/report.csv").unwrap())
}

#[test]
fn configured_run_cleans_summarizes_filters_and_exports() {
    let config = RunConfig::from_path("tests/fixtures/run_config.json").unwrap();
    let reports = process_uploads(&[report_upload()], &config, &PipelineOptions::default());
    assert_eq!(reports.len(), 1);

    let file = reports[0].processed().unwrap();
    assert_eq!(file.preview.row_count(), 5);
    assert_eq!(file.clean.duplicates_removed, 1);
    assert_eq!(file.clean.fill.filled.len(), 1);
    assert_eq!(file.clean.fill.filled[0].mean, 2.0);
    assert_eq!(file.clean.fill.filled[0].cells_filled, 2);

    let counts = file.status_counts.as_ref().unwrap();
    let labels: Vec<&str> = counts.bars().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Pass", "Fail", "Blocked"]);
    let pie: Vec<String> = counts.pie_slices().into_iter().map(|s| s.percent_label).collect();
    assert_eq!(pie, vec!["50.0%", "25.0%", "25.0%"]);
    assert!(file.show_pie);

    assert_eq!(file.filtered_rows, Some(2));
    assert_eq!(file.dataset.column_names(), vec!["ID", "Status", "Duration"]);

    let artifact = file.export.as_ref().unwrap();
    assert_eq!(artifact.file_name, "report.csv");
    assert_eq!(artifact.mime_type, "text/csv");
    assert_eq!(
        String::from_utf8(artifact.bytes.clone()).unwrap(),
        "ID,Status,Duration\n1,Pass,1.5\n4,Blocked,2.0\n"
    );
    assert!(file.issues.is_empty());
}

#[test]
fn unsupported_file_does_not_stop_the_batch() {
    let uploads = vec![
        Upload::new("report.txt", "ID,Status\n1,Pass\n"),
        report_upload(),
    ];
    let reports = process_uploads(&uploads, &RunConfig::default(), &PipelineOptions::default());

    assert_eq!(reports.len(), 2);
    assert!(!reports[0].is_ok());
    assert!(reports[0]
        .error()
        .unwrap()
        .to_string()
        .contains("unsupported file type '.txt'"));
    assert!(reports[1].is_ok());
    assert_eq!(reports[1].processed().unwrap().dataset.row_count(), 5);
}

#[test]
fn files_are_processed_independently() {
    let config = RunConfig::from_json_str(r#"{"files": {"b.csv": {"remove_duplicates": true}}}"#).unwrap();
    let body = "ID,Status\n1,Pass\n1,Pass\n";
    let uploads = vec![Upload::new("a.csv", body), Upload::new("b.csv", body)];

    let reports = process_uploads(&uploads, &config, &PipelineOptions::default());
    assert_eq!(reports[0].processed().unwrap().dataset.row_count(), 2);
    assert_eq!(reports[1].processed().unwrap().dataset.row_count(), 1);
}

#[test]
fn missing_status_column_skips_summary() {
    let upload = Upload::new("plain.csv", "ID,Score\n1,5\n");
    let report = process_upload(&upload, &FileSelections::default(), &PipelineOptions::default());
    let file = report.processed().unwrap();
    assert!(file.status_counts.is_none());
    assert!(file.security_levels.is_none());
}

#[test]
fn security_levels_offer_distinct_values_in_order() {
    let report = process_upload(&report_upload(), &FileSelections::default(), &PipelineOptions::default());
    let levels = report.processed().unwrap().security_levels.clone().unwrap();
    assert_eq!(
        levels,
        vec![
            Value::Utf8("High".to_string()),
            Value::Utf8("Low".to_string()),
            Value::Utf8("Medium".to_string()),
        ]
    );
}

#[test]
fn stage_events_follow_pipeline_order() {
    let obs = Arc::new(RecordingPipelineObserver::default());
    let options = PipelineOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };
    let sel = FileSelections {
        remove_duplicates: true,
        security_levels: vec!["Low".to_string()],
        columns: Some(vec!["ID".to_string(), "Owner".to_string()]),
        export: Some(ReportFormat::Csv),
        ..Default::default()
    };
    let report = process_upload(&report_upload(), &sel, &options);
    let file = report.processed().unwrap();
    assert!(matches!(file.issues[0], ReportError::ColumnNotFound { ref column, .. } if column == "Owner"));

    let kinds: Vec<&'static str> = obs
        .events()
        .iter()
        .map(|(name, e)| {
            assert_eq!(name, "report.csv");
            match e {
                PipelineEvent::FileStarted { .. } => "started",
                PipelineEvent::DuplicatesRemoved { .. } => "dedup",
                PipelineEvent::StatusSummarized { .. } => "summary",
                PipelineEvent::Filtered { .. } => "filter",
                PipelineEvent::StageFailed { stage, .. } => *stage,
                PipelineEvent::Exported { .. } => "export",
                PipelineEvent::FileFinished { .. } => "finished",
                _ => "other",
            }
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["started", "dedup", "summary", "filter", "project", "export", "finished"]
    );
}
