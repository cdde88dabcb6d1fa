//! Criterion benchmarks for devnull_logger

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use devnull_logger::core::timestamp::render;
use devnull_logger::prelude::*;
use devnull_logger::{format, DEFAULT_PATTERN};
use serde_json::json;
use std::io;
use std::sync::Arc;

/// Logger writing formatted lines to a sink, so only the pipeline is measured.
fn sink_logger() -> Logger {
    let logger = Logger::builder()
        .base(false)
        .environment(Environment::Production)
        .build();
    logger.use_transport::<StreamTransport>(StreamOptions::writer(io::sink()));
    logger
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("without_transports", |b| {
        b.iter(|| {
            let logger = Logger::builder().base(false).build();
            black_box(logger)
        });
    });

    group.bench_function("with_ignore_list", |b| {
        b.iter(|| {
            let logger = Logger::builder()
                .base(false)
                .ignore_list(black_box("vendor/*, generated_*.rs build.rs"))
                .build();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger();

    group.bench_function("info_plain", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("info_formatted", |b| {
        b.iter(|| logger.info(black_box(("request %s took %dms", "/health", 12))));
    });

    group.bench_function("info_namespace_override", |b| {
        b.iter(|| logger.info(black_box(("http", "request served"))));
    });

    let without_stamp = sink_logger();
    without_stamp.disable("timestamp");
    group.bench_function("info_without_stamp", |b| {
        b.iter(|| without_stamp.info(black_box("Info message")));
    });

    let without_callsite = sink_logger();
    without_callsite.set("namespacing", LogLevel::Alert);
    group.bench_function("info_without_callsite", |b| {
        b.iter(|| without_callsite.info(black_box("Info message")));
    });

    group.finish();
}

fn bench_concurrent_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_dispatch");

    let logger = Arc::new(sink_logger());

    group.bench_function("single_thread", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| logger.info(black_box("Concurrent message")).map(|_| ()));
    });

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        let _ = logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger();
    logger.set("level", LogLevel::Warning);

    group.bench_function("below_threshold", |b| {
        b.iter(|| logger.debug(black_box("filtered out")));
    });

    let silenced = sink_logger();
    silenced
        .ignore("logger_benchmarks.rs")
        .expect("valid pattern");
    group.bench_function("ignored_file", |b| {
        b.iter(|| silenced.info(black_box("silenced")));
    });

    let noisy = sink_logger();
    for i in 0..32 {
        noisy
            .ignore(&format!("module_{}_*.rs", i))
            .expect("valid pattern");
    }
    group.bench_function("32_patterns_no_match", |b| {
        b.iter(|| noisy.info(black_box("checked against every pattern")));
    });

    group.finish();
}

// ============================================================================
// Formatter and Stamp Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let printf = vec![
        Arg::from("user %s logged in from %s after %d attempts"),
        Arg::from("ada"),
        Arg::from("10.0.0.1"),
        Arg::from(3),
    ];
    group.bench_function("printf", |b| {
        b.iter(|| format(black_box(&printf)));
    });

    let inspected = vec![
        Arg::from(json!({ "user": "ada", "roles": ["admin", "ops"], "active": true })),
        Arg::from(42),
    ];
    group.bench_function("inspect", |b| {
        b.iter(|| format(black_box(&inspected)));
    });

    let instant = Utc.with_ymd_and_hms(2011, 7, 5, 13, 5, 9).unwrap();
    group.bench_function("stamp_default_pattern", |b| {
        b.iter(|| render(black_box(DEFAULT_PATTERN), &instant));
    });

    group.bench_function("stamp_iso", |b| {
        b.iter(|| render(black_box("{toISOString}"), &instant));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_dispatch,
    bench_concurrent_dispatch,
    bench_filtering,
    bench_formatting
);

criterion_main!(benches);
