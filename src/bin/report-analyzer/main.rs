//! `report-analyzer` command-line front end.
//!
//! Each file given on the command line goes through load → clean → summarize → filter →
//! project → export using the selections from `--config` with command-line flags layered on
//! top. Converted files are written to `--out-dir` under the original name with the new
//! extension; an input file is never overwritten. A file that fails to load or to be written
//! is reported and the run continues.
//!
//! ```bash
//! report-analyzer --dedup --fill-missing --levels High --format excel --pie q3.csv q4.xlsx
//! ```

mod args;
mod output;
mod render;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use report_analyzer::ingestion::{CompositeObserver, FileObserver, IngestionObserver, LogObserver, Upload};
use report_analyzer::pipeline::{
    process_uploads, FileReport, LogPipelineObserver, PipelineOptions, RunConfig,
};
use report_analyzer::ReportResult;

use args::Cli;
use output::ArtifactWriter;
use render::{render_text, FileSummary};

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();

    match run(&cli) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// File counts of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    ok: usize,
    failed: usize,
}

fn run(cli: &Cli) -> ReportResult<RunSummary> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };
    cli.apply_to(&mut config);

    let options = pipeline_options(cli);

    let mut read_failures = 0usize;
    let mut uploads = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match read_upload(path) {
            Ok(upload) => uploads.push(upload),
            Err(e) => {
                read_failures += 1;
                log::error!("failed to read {}: {e}", path.display());
                eprintln!("error: cannot read {}: {e}", path.display());
            }
        }
    }

    let reports = process_uploads(&uploads, &config, &options);
    let mut writer = ArtifactWriter::new(&cli.out_dir, cli.files.iter().map(|p| p.as_path()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = read_failures;
    for report in &reports {
        if !report.is_ok() {
            failed += 1;
        }
        emit(cli, report, &mut out)?;
        if let Some(artifact) = report.processed().and_then(|f| f.export.as_ref()) {
            if let Err(e) = writer.write(artifact) {
                failed += 1;
                log::error!("file={} export not written: {e}", report.file_name);
                eprintln!("error: {}: export not written: {e}", report.file_name);
            }
        }
    }

    let summary = RunSummary {
        ok: cli.files.len() - failed,
        failed,
    };
    if !cli.json {
        writeln!(out, "All reports processed ({} ok, {} failed)", summary.ok, summary.failed)?;
    }
    out.flush()?;

    Ok(summary)
}

fn pipeline_options(cli: &Cli) -> PipelineOptions {
    let mut observers: Vec<Arc<dyn IngestionObserver>> = vec![Arc::new(LogObserver)];
    if let Some(path) = &cli.event_log {
        observers.push(Arc::new(FileObserver::new(path)));
    }

    let mut options = PipelineOptions {
        observer: Some(Arc::new(LogPipelineObserver)),
        ..Default::default()
    };
    options.load.observer = Some(Arc::new(CompositeObserver::new(observers)));
    options
}

/// Reads a file into an [`Upload`] named after its final path component.
fn read_upload(path: &Path) -> io::Result<Upload> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Upload::new(name, bytes))
}

fn emit(cli: &Cli, report: &FileReport, out: &mut impl Write) -> ReportResult<()> {
    if cli.json {
        serde_json::to_writer(&mut *out, &FileSummary::new(report)).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        render_text(report, out)?;
    }
    Ok(())
}
