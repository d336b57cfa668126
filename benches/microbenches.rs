//! Criterion microbenches for the shapejoin core.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Decoding multi-part records into rings
//! - Joining N attribute rows against M geometry records

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use shapejoin::ir::{AttributeRow, GeometryRecord, Point};
use shapejoin::join::{decode, join};

/// A county-sized record: `parts` rings of `per_part` points each.
fn synthetic_record(key: i64, parts: usize, per_part: usize) -> GeometryRecord {
    let points: Vec<Point> = (0..parts * per_part)
        .map(|i| Point::new(key as f64 + (i as f64).cos(), (i as f64).sin()))
        .collect();
    let offsets = if parts > 1 {
        (0..parts).map(|p| p * per_part).collect()
    } else {
        Vec::new()
    };
    GeometryRecord::new(key, points).with_parts(offsets)
}

/// Rows for keys `0..n`, with every fourth key absent from the geometry.
fn synthetic_inputs(n: usize) -> (Vec<AttributeRow>, Vec<GeometryRecord>) {
    let rows = (0..n as i64)
        .map(|k| AttributeRow::new(k).with_field("yield", k as f64 * 1.5))
        .collect();
    let records = (0..n as i64)
        .filter(|k| k % 4 != 0)
        .map(|k| synthetic_record(k, 1 + (k as usize % 3), 64))
        .collect();
    (rows, records)
}

/// Benchmark ring decoding.
fn bench_decode(c: &mut Criterion) {
    let record = synthetic_record(1, 8, 256);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(record.num_points() as u64));

    group.bench_function("decode_8_parts", |b| {
        b.iter(|| {
            let rings = decode(black_box(&record));
            black_box(rings)
        })
    });

    group.finish();
}

/// Benchmark the join at increasing sizes; time should grow linearly.
fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    for n in [100usize, 1_000, 3_000] {
        let (rows, records) = synthetic_inputs(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let out = join(black_box(&rows), black_box(&records)).unwrap();
                black_box(out)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_join);
criterion_main!(benches);
