//! Store throughput and scaling benchmarks.
//!
//! Measures append and read performance of the in-memory ring buffer, and the
//! cost of the logger's level gate.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `append` | Append throughput below and at capacity, with and without subscribers |
//! | `read` | `snapshot`, `latest(100)` and `since` on a full store |
//! | `logger` | Filtered vs recorded calls through a `ModuleLogger` |
//! | `scaling` | Fill + snapshot as capacity grows from 500 to 100k |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench store_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use applog::{LogContext, LogLevel, LogStore, NewEntry};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn entry(i: usize) -> NewEntry {
    NewEntry::new(LogLevel::Info, "Bench", format!("line {i}"))
}

fn full_store(capacity: usize) -> LogStore {
    let store = LogStore::new(capacity);
    for i in 0..capacity {
        store.append(entry(i));
    }
    store
}

// ---------------------------------------------------------------------------
// Append throughput
// ---------------------------------------------------------------------------

fn append_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for entry_count in [100usize, 500] {
        group.throughput(Throughput::Elements(entry_count as u64));
        group.bench_with_input(
            BenchmarkId::new("below_capacity", entry_count),
            &entry_count,
            |b, &n| {
                b.iter(|| {
                    let store = LogStore::new(n);
                    for i in 0..n {
                        store.append(entry(i));
                    }
                    black_box(store.len())
                })
            },
        );
    }

    // At capacity: every append evicts the oldest entry.
    group.throughput(Throughput::Elements(1_000));
    group.bench_function("at_capacity_500", |b| {
        let store = full_store(500);
        b.iter(|| {
            for i in 0..1_000 {
                store.append(entry(i));
            }
        })
    });

    group.bench_function("with_4_subscribers", |b| {
        let store = full_store(500);
        let subs: Vec<_> = (0..4).map(|_| store.subscribe(|| {})).collect();
        b.iter(|| {
            for i in 0..1_000 {
                store.append(entry(i));
            }
        });
        subs.iter().for_each(|s| s.unsubscribe());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Read throughput
// ---------------------------------------------------------------------------

fn read_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let store = full_store(500);
    let midpoint = store.last_id() - 250;

    group.bench_function("snapshot_500", |b| b.iter(|| black_box(store.snapshot())));
    group.bench_function("latest_100_of_500", |b| b.iter(|| black_box(store.latest(100))));
    group.bench_function("since_midpoint", |b| b.iter(|| black_box(store.since(midpoint))));

    group.finish();
}

// ---------------------------------------------------------------------------
// Logger gate
// ---------------------------------------------------------------------------

fn logger_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger");
    let ctx = LogContext::builder().build();
    let log = ctx.logger("Bench");

    ctx.set_level(LogLevel::Error);
    group.bench_function("filtered_debug", |b| b.iter(|| log.debug("dropped", &[])));

    ctx.set_level(LogLevel::Debug);
    group.bench_function("recorded_info", |b| b.iter(|| log.info("kept", &[])));

    group.finish();
}

// ---------------------------------------------------------------------------
// Scaling: capacity axis
// ---------------------------------------------------------------------------

fn scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for capacity in [500usize, 5_000, 100_000] {
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_with_input(
            BenchmarkId::new("fill_then_snapshot", capacity),
            &capacity,
            |b, &cap| b.iter(|| black_box(full_store(cap).snapshot().len())),
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion registration
// ---------------------------------------------------------------------------

criterion_group!(store_benches, append_bench, read_bench, logger_bench, scaling_bench);
criterion_main!(store_benches);
