use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rand::SeedableRng;
use rand::rngs::StdRng;

use betsync::dataset::{SAMPLE_HISTORY_CSV, parse_history_csv};
use betsync::records::clean_records;
use betsync::report::analyze_csv;
use betsync::risk::ScoringConfig;
use betsync::synthetic::{SyntheticConfig, generate_history, history_to_csv};

fn synthetic_csv(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let cfg = SyntheticConfig {
        rows,
        ..SyntheticConfig::default()
    };
    history_to_csv(&generate_history(&cfg, &mut rng))
}

fn bench_parse_history(c: &mut Criterion) {
    let csv = synthetic_csv(5_000);
    c.bench_function("parse_history_5k", |b| {
        b.iter(|| {
            let rows = parse_history_csv(black_box(&csv)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_clean_records(c: &mut Criterion) {
    let csv = synthetic_csv(5_000);
    let rows = parse_history_csv(&csv).unwrap();
    c.bench_function("clean_records_5k", |b| {
        b.iter(|| {
            let outcome = clean_records(black_box(&rows));
            black_box(outcome.records.len());
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let csv = synthetic_csv(5_000);
    let cfg = ScoringConfig::default();
    c.bench_function("analyze_csv_5k", |b| {
        b.iter(|| {
            let report = analyze_csv(black_box(&csv), &cfg).unwrap();
            black_box(report.profile.score);
        })
    });
}

fn bench_sample_analysis(c: &mut Criterion) {
    let cfg = ScoringConfig::default();
    c.bench_function("analyze_sample", |b| {
        b.iter(|| {
            let report = analyze_csv(black_box(SAMPLE_HISTORY_CSV), &cfg).unwrap();
            black_box(report.profile.score);
        })
    });
}

criterion_group!(
    perf,
    bench_parse_history,
    bench_clean_records,
    bench_full_pipeline,
    bench_sample_analysis
);
criterion_main!(perf);
