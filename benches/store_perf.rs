// Store and sampler performance benchmarks.
//
// Run with: cargo bench
//
// Performance Targets:
// | Operation         | Target  | Description                        |
// |-------------------|---------|------------------------------------|
// | Bulk insert (1k)  | < 5ms   | Seed 1000 records in one batch     |
// | List (1k)         | < 1ms   | Snapshot 1000 records              |
// | Purchase          | < 5us   | Single-copy purchase, uncontended  |
// | Editor picks (1k) | < 500us | Pick scan over 1000 records        |
// | Generate (50)     | < 100us | Synthesize 50 records              |
// | Sample (10 of 100)| < 5us   | Unique draw from a candidate pool  |

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::sync::Once;
use std::time::Instant;
use stockbench::model::{CopyRequest, RecordId, StockRecord};
use stockbench::sampler::RecordSampler;
use stockbench::store::{InMemoryStore, InventoryStore};
use tracing::info;

/// Create a benchmark record with the given index.
fn bench_record(i: u32) -> StockRecord {
    StockRecord::new(
        i + 1,
        format!("Benchmark record {i:06}"),
        format!("Author {}", i % 12),
        f64::from(i % 5900 + 100) / 100.0,
        1_000,
    )
    .with_editor_pick(i % 10 == 0)
}

fn init_bench_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = stockbench::logging::init_logging(0, false);
    });
}

fn log_group_start(name: &str) {
    info!("benchmark_group_start: name={name}");
}

fn log_group_end(name: &str) {
    info!("benchmark_group_end: name={name}");
}

fn log_bench_start(name: &str) -> Instant {
    info!("benchmark_start: {name}");
    Instant::now()
}

fn log_bench_end(name: &str, started_at: Instant) {
    info!("benchmark_end: {name} duration={:?}", started_at.elapsed());
}

/// Set up a store holding `count` records.
fn setup_store(count: u32) -> InMemoryStore {
    let records: Vec<StockRecord> = (0..count).map(bench_record).collect();
    InMemoryStore::with_records(records).expect("benchmark records are valid")
}

/// Benchmark batch insertion into a fresh store.
fn bench_bulk_insert(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "store/bulk_insert";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    for size in [100_u32, 1_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let bench_name = format!("store/bulk_insert/size={size}");
            let bench_start = log_bench_start(&bench_name);
            let records: Vec<StockRecord> = (0..size).map(bench_record).collect();

            b.iter_with_setup(
                || (InMemoryStore::new(), records.clone()),
                |(store, batch)| {
                    store.bulk_insert(black_box(&batch)).unwrap();
                },
            );
            log_bench_end(&bench_name, bench_start);
        });
    }

    group.finish();
    log_group_end(group_name);
}

/// Benchmark snapshotting the full catalog.
fn bench_list_all(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "store/list_all";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    for size in [100_u32, 1_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let bench_name = format!("store/list_all/size={size}");
            let bench_start = log_bench_start(&bench_name);
            let store = setup_store(size);

            b.iter(|| {
                let all = store.list_all().unwrap();
                black_box(all);
            });
            log_bench_end(&bench_name, bench_start);
        });
    }

    group.finish();
    log_group_end(group_name);
}

/// Benchmark the customer hot path: a two-record single-copy purchase.
fn bench_purchase(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "store/purchase";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    group.bench_function("two_records", |b| {
        let bench_name = "store/purchase/two_records";
        let bench_start = log_bench_start(bench_name);

        // Deep stock so the loop never sells out mid-measurement.
        let store = InMemoryStore::with_records([
            StockRecord::new(1, "Bottomless A", "Bench", 5.0, u32::MAX),
            StockRecord::new(2, "Bottomless B", "Bench", 5.0, u32::MAX),
        ])
        .expect("benchmark records are valid");
        let requests = [CopyRequest::new(1, 1), CopyRequest::new(2, 1)];

        b.iter(|| {
            store.purchase(black_box(&requests)).unwrap();
        });
        log_bench_end(bench_name, bench_start);
    });

    group.finish();
    log_group_end(group_name);
}

/// Benchmark the editor-pick scan at catalog scale.
fn bench_editor_picks(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "store/editor_picks";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    group.bench_function("three_of_1k", |b| {
        let bench_name = "store/editor_picks/three_of_1k";
        let bench_start = log_bench_start(bench_name);
        let store = setup_store(1_000);

        b.iter(|| {
            let picks = store.editor_picks(black_box(3)).unwrap();
            black_box(picks);
        });
        log_bench_end(bench_name, bench_start);
    });

    group.finish();
    log_group_end(group_name);
}

/// Benchmark synthetic record generation.
fn bench_generate_records(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "sampler/generate_records";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    for size in [5_usize, 50] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let bench_name = format!("sampler/generate_records/size={size}");
            let bench_start = log_bench_start(&bench_name);
            let mut sampler = RecordSampler::seeded(42);

            b.iter(|| {
                let batch = sampler.generate_records(black_box(size)).unwrap();
                black_box(batch);
            });
            log_bench_end(&bench_name, bench_start);
        });
    }

    group.finish();
    log_group_end(group_name);
}

/// Benchmark unique sampling from a candidate pool.
fn bench_sample_unique(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "sampler/sample_unique";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    group.bench_function("ten_of_100", |b| {
        let bench_name = "sampler/sample_unique/ten_of_100";
        let bench_start = log_bench_start(bench_name);
        let candidates: BTreeSet<RecordId> = (1..=100).collect();
        let mut sampler = RecordSampler::seeded(42);

        b.iter(|| {
            let picked = sampler.sample_unique(black_box(&candidates), 10).unwrap();
            black_box(picked);
        });
        log_bench_end(bench_name, bench_start);
    });

    group.finish();
    log_group_end(group_name);
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    store_benches,
    bench_bulk_insert,
    bench_list_all,
    bench_purchase,
    bench_editor_picks,
);

criterion_group!(sampler_benches, bench_generate_records, bench_sample_unique);

criterion_main!(store_benches, sampler_benches);
