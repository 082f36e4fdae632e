use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use report_analyzer::ingestion::{load_bytes, LoadOptions, ReportFormat, Upload};
use report_analyzer::pipeline::{process_upload, FileSelections, PipelineOptions};

const ROWS: usize = 10_000;

fn synthetic_report() -> Vec<u8> {
    let statuses = ["Pass", "Fail", "Blocked", "Pass"];
    let levels = ["High", "Medium", "Low"];
    let mut out = String::from("ID,Test Case,Status,Security Level,Duration\n");
    for i in 0..ROWS {
        let duration = if i % 7 == 0 { String::new() } else { format!("{}.{}", i % 13, i % 10) };
        out.push_str(&format!(
            "{},case_{},{},{},{}\n",
            i % (ROWS / 2),
            i,
            statuses[i % statuses.len()],
            levels[i % levels.len()],
            duration
        ));
    }
    out.into_bytes()
}

fn bench_load(c: &mut Criterion) {
    let bytes = synthetic_report();
    let opts = LoadOptions::default();
    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("csv", |b| {
        b.iter(|| load_bytes(black_box(&bytes), "bench.csv", &opts))
    });
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let upload = Upload::new("bench.csv", synthetic_report());
    let options = PipelineOptions::default();
    let selections = FileSelections {
        remove_duplicates: true,
        fill_missing: true,
        security_levels: vec!["High".to_string(), "Low".to_string()],
        columns: Some(vec!["ID".to_string(), "Status".to_string(), "Duration".to_string()]),
        export: Some(ReportFormat::Csv),
        ..Default::default()
    };

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(ROWS as u64));
    group.bench_function("all_stages_csv", |b| {
        b.iter(|| process_upload(black_box(&upload), &selections, &options))
    });
    group.finish();
}

criterion_group!(benches, bench_load, bench_pipeline);
criterion_main!(benches);
