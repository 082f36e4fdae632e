//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use report_analyzer::ingestion::ReportFormat;
use report_analyzer::pipeline::{FileSelections, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "report-analyzer")]
#[command(about = "Analyze test reports: clean, summarize, filter, and convert CSV/Excel files")]
#[command(version)]
pub struct Cli {
    /// Report files (CSV or Excel), processed in the given order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON run config with `defaults` and per-file `files` selections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Remove duplicate rows
    #[arg(long)]
    pub dedup: bool,

    /// Fill missing numeric values with the column mean
    #[arg(long)]
    pub fill_missing: bool,

    /// Security levels to keep (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub levels: Vec<String>,

    /// Columns to keep, in order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Convert each file to this format: csv or excel
    #[arg(long)]
    pub format: Option<ReportFormat>,

    /// Show the pass/fail distribution as pie percentages
    #[arg(long)]
    pub pie: bool,

    /// Number of rows in the preview
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// Directory that converted files are written to; input files are never overwritten
    #[arg(long, default_value = "converted")]
    pub out_dir: PathBuf,

    /// Append load events to this file
    #[arg(long)]
    pub event_log: Option<PathBuf>,

    /// Print one JSON summary per file instead of text
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies the flags given on the command line on top of every selection in `config`.
    pub fn apply_to(&self, config: &mut RunConfig) {
        self.apply_to_selections(&mut config.defaults);
        for sel in config.files.values_mut() {
            self.apply_to_selections(sel);
        }
    }

    fn apply_to_selections(&self, sel: &mut FileSelections) {
        if self.dedup {
            sel.remove_duplicates = true;
        }
        if self.fill_missing {
            sel.fill_missing = true;
        }
        if !self.levels.is_empty() {
            sel.security_levels = self.levels.clone();
        }
        if let Some(columns) = &self.columns {
            sel.columns = Some(columns.clone());
        }
        if let Some(format) = self.format {
            sel.export = Some(format);
        }
        if self.pie {
            sel.show_pie = true;
        }
        if let Some(n) = self.preview_rows {
            sel.preview_rows = n;
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
