//! Benchmarks for the holdings aggregator.
//!
//! Run with: cargo bench -p fundscope-holdings
//! Parallel overlap: cargo bench -p fundscope-holdings --features parallel

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fundscope_core::{HoldingRow, Sentiment};
use fundscope_holdings::{
    compute_conviction, compute_scheme_overlap, summarize_stocks, AggregatorConfig,
};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// `schemes` schemes of 50 holdings each, drawn from a 400-stock pool.
fn create_rows(schemes: usize) -> Vec<HoldingRow> {
    let sentiments = [Sentiment::Buy, Sentiment::Hold, Sentiment::Trimmed];
    (0..schemes)
        .flat_map(|s| {
            (0..50).map(move |h| {
                let stock = (s * 37 + h * 11) % 400;
                HoldingRow::new(format!("Scheme {s:04}"), format!("Stock {stock:04}"))
                    .with_percent_aum(((s + h) % 50) as f64 / 10.0)
                    .with_sentiment(sentiments[(s + h) % sentiments.len()])
            })
        })
        .collect()
}

// =============================================================================
// STOCK AND CONVICTION BENCHMARKS
// =============================================================================

fn bench_summarize_stocks(c: &mut Criterion) {
    let config = AggregatorConfig::default();
    let mut group = c.benchmark_group("summarize_stocks");

    for schemes in [10, 50, 200].iter() {
        let rows = create_rows(*schemes);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(schemes), &rows, |b, rows| {
            b.iter(|| summarize_stocks(black_box(rows), None, &config))
        });
    }

    group.finish();
}

fn bench_conviction(c: &mut Criterion) {
    let config = AggregatorConfig::default();
    let mut group = c.benchmark_group("compute_conviction");

    for schemes in [10, 50, 200].iter() {
        let rows = create_rows(*schemes);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(schemes), &rows, |b, rows| {
            b.iter(|| compute_conviction(black_box(rows), &config))
        });
    }

    group.finish();
}

// =============================================================================
// OVERLAP BENCHMARKS
// =============================================================================

fn bench_overlap_comparison(c: &mut Criterion) {
    let rows = create_rows(200);
    let sequential = AggregatorConfig::sequential();
    let parallel = AggregatorConfig::new().with_threshold(2);

    let mut group = c.benchmark_group("overlap_comparison_200");
    group.sample_size(30);
    group.throughput(Throughput::Elements(200));

    group.bench_function("sequential", |b| {
        b.iter(|| compute_scheme_overlap(black_box(&rows), &sequential))
    });

    group.bench_function("parallel", |b| {
        b.iter(|| compute_scheme_overlap(black_box(&rows), &parallel))
    });

    group.finish();
}

criterion_group!(stocks, bench_summarize_stocks, bench_conviction);

criterion_group!(overlap, bench_overlap_comparison);

criterion_main!(stocks, overlap);
