//! Benchmarks for the checklist update engine.
//!
//! Run with: cargo bench -p vchk-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vchk_core::{Check, Checklist, Verification, dedup_identical_checks, set_check_passed};

fn checklist(sources: usize, checks: usize) -> Checklist {
    (0..sources)
        .map(|s| {
            Verification::new(
                format!("source-{s}"),
                (0..checks).map(|c| {
                    Check::new(format!("check-{c}"), format!("Check {c}"), c % 2 == 0)
                }),
            )
        })
        .collect()
}

fn bench_set_check_passed(c: &mut Criterion) {
    let mut group = c.benchmark_group("update/set_check_passed");

    for (sources, checks) in [(4, 8), (32, 16), (256, 32)] {
        let list = checklist(sources, checks);
        let target = (sources / 2, checks / 2);

        group.bench_with_input(
            BenchmarkId::new("independent", format!("{sources}x{checks}")),
            &list,
            |b, list| b.iter(|| black_box(set_check_passed(list, target.0, target.1, true))),
        );

        let shared = dedup_identical_checks(&list);
        group.bench_with_input(
            BenchmarkId::new("shared", format!("{sources}x{checks}")),
            &shared,
            |b, list| b.iter(|| black_box(set_check_passed(list, target.0, target.1, true))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_set_check_passed);
criterion_main!(benches);
