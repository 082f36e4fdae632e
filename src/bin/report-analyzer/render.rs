//! Plain-text and JSON rendering of per-file reports.

use std::io::{self, Write};

use report_analyzer::pipeline::{FileReport, ProcessedFile};
use report_analyzer::processing::{PieSlice, StatusCount};
use report_analyzer::types::DataSet;
use serde::Serialize;

const BAR_WIDTH: usize = 40;
const MAX_CELL_WIDTH: usize = 24;

pub fn render_text(report: &FileReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "File Name: {}", report.file_name)?;
    writeln!(out, "File Size: {:.2} KB", report.size_kb())?;

    let file = match report.processed() {
        Some(f) => f,
        None => {
            if let Some(e) = report.error() {
                writeln!(out, "Error: {e}")?;
            }
            return writeln!(out);
        }
    };

    writeln!(out, "\nPreview ({} rows)", file.preview.row_count())?;
    render_table(&file.preview, out)?;

    if file.clean.duplicates_removed > 0 {
        writeln!(out, "\nDuplicates removed: {}", file.clean.duplicates_removed)?;
    }
    for fill in &file.clean.fill.filled {
        writeln!(
            out,
            "Filled {} missing value(s) in '{}' with {}",
            fill.cells_filled, fill.column, fill.mean
        )?;
    }

    if let Some(counts) = &file.status_counts {
        writeln!(out, "\nTest Case Status Summary")?;
        render_bars(counts, out)?;
        if file.show_pie {
            writeln!(out, "\nPass/Fail Distribution")?;
            render_pie(&counts.pie_slices(), out)?;
        }
    }

    if let Some(rows) = file.filtered_rows {
        writeln!(out, "\nFiltered Data (Showing {rows} rows)")?;
    }

    for issue in &file.issues {
        writeln!(out, "Warning: {issue}")?;
    }
    if let Some(artifact) = &file.export {
        writeln!(
            out,
            "\nConverted to {} -> {} ({} bytes, {})",
            artifact.format,
            artifact.file_name,
            artifact.len(),
            artifact.mime_type
        )?;
    }
    writeln!(out)
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_CELL_WIDTH {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(MAX_CELL_WIDTH - 1).collect();
        t.push('…');
        t
    }
}

fn render_table(ds: &DataSet, out: &mut impl Write) -> io::Result<()> {
    if ds.column_count() == 0 {
        return writeln!(out, "(no columns)");
    }
    let header: Vec<String> = ds.schema.field_names().map(truncate).collect();
    let body: Vec<Vec<String>> = ds
        .rows
        .iter()
        .map(|row| row.iter().map(|v| truncate(&v.to_string())).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            body.iter()
                .filter_map(|r| r.get(i))
                .chain(std::iter::once(&header[i]))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    writeln!(out, "{}", line(&header))?;
    writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    )?;
    for row in &body {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}

fn render_bars(counts: &StatusCount, out: &mut impl Write) -> io::Result<()> {
    let max = counts.bars().iter().map(|e| e.count).max().unwrap_or(0);
    let label_width = counts.bars().iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
    for entry in counts.bars() {
        let len = if max == 0 { 0 } else { entry.count * BAR_WIDTH / max };
        writeln!(
            out,
            "{:<label_width$} | {} {}",
            entry.label,
            "█".repeat(len.max(1)),
            entry.count
        )?;
    }
    Ok(())
}

fn render_pie(slices: &[PieSlice], out: &mut impl Write) -> io::Result<()> {
    for s in slices {
        writeln!(out, "{}: {} ({})", s.label, s.percent_label, s.count)?;
    }
    Ok(())
}

/// Machine-readable per-file summary for `--json`.
#[derive(Debug, Serialize)]
pub struct FileSummary<'a> {
    file_name: &'a str,
    size_kb: f64,
    error: Option<String>,
    preview: Option<&'a DataSet>,
    rows: Option<usize>,
    columns: Option<Vec<String>>,
    duplicates_removed: Option<usize>,
    status_counts: Option<&'a StatusCount>,
    pie: Option<Vec<PieSlice>>,
    filtered_rows: Option<usize>,
    export_file: Option<&'a str>,
    issues: Vec<String>,
}

impl<'a> FileSummary<'a> {
    pub fn new(report: &'a FileReport) -> Self {
        let file: Option<&'a ProcessedFile> = report.processed();
        Self {
            file_name: &report.file_name,
            size_kb: report.size_kb(),
            error: report.error().map(|e| e.to_string()),
            preview: file.map(|f| &f.preview),
            rows: file.map(|f| f.dataset.row_count()),
            columns: file.map(|f| f.dataset.column_names()),
            duplicates_removed: file.map(|f| f.clean.duplicates_removed),
            status_counts: file.and_then(|f| f.status_counts.as_ref()),
            pie: file
                .filter(|f| f.show_pie)
                .and_then(|f| f.status_counts.as_ref())
                .map(StatusCount::pie_slices),
            filtered_rows: file.and_then(|f| f.filtered_rows),
            export_file: file.and_then(|f| f.export.as_ref()).map(|a| a.file_name.as_str()),
            issues: file
                .map(|f| f.issues.iter().map(|e| e.to_string()).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_analyzer::ingestion::Upload;
    use report_analyzer::pipeline::{process_upload, FileSelections, PipelineOptions};

    #[test]
    fn text_report_lists_summary_and_filter() {
        let upload = Upload::new(
            "r.csv",
            "ID,Status,Security Level\n1,Pass,High\n2,Fail,Low\n3,Pass,High\n",
        );
        let sel = FileSelections {
            security_levels: vec!["High".to_string()],
            show_pie: true,
            ..Default::default()
        };
        let report = process_upload(&upload, &sel, &PipelineOptions::default());
        let mut buf = Vec::new();
        render_text(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("File Name: r.csv"));
        assert!(text.contains("Test Case Status Summary"));
        assert!(text.contains("Pass: 66.7% (2)"));
        assert!(text.contains("Filtered Data (Showing 2 rows)"));
    }

    #[test]
    fn failed_file_renders_error() {
        let report = process_upload(
            &Upload::new("notes.txt", "x"),
            &FileSelections::default(),
            &PipelineOptions::default(),
        );
        let mut buf = Vec::new();
        render_text(&report, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("unsupported file type '.txt'"));

        let json = serde_json::to_string(&FileSummary::new(&report)).unwrap();
        assert!(json.contains("\"rows\":null"));
    }
}
