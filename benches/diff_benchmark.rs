//! Benchmarks for snapshot parsing and diffing.

use bucketwatch::{ChangeSet, Snapshot};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn listing(count: usize, offset: usize) -> String {
    (offset..offset + count)
        .map(|i| format!("2024-01-01  12:00:00  {i:>10}  photos/2024/{i:08}.jpg\n"))
        .collect()
}

fn benchmark_diff(c: &mut Criterion) {
    let previous_text = listing(100_000, 0);
    let current_text = listing(100_000, 1_000);

    c.bench_function("parse_100k", |b| {
        b.iter(|| Snapshot::parse(black_box(&current_text)));
    });

    let previous = Snapshot::parse(&previous_text);
    let current = Snapshot::parse(&current_text);
    c.bench_function("diff_100k", |b| {
        b.iter(|| ChangeSet::between(black_box(&current), black_box(&previous)));
    });
}

criterion_group!(benches, benchmark_diff);
criterion_main!(benches);
