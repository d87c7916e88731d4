//! # Inequality Benchmarks
//!
//! Measures each evaluator end to end with the default trial count.
//!
//! Run: `cargo bench --bench inequality_bench`

use bell_core::{Inequality, TrialRunner};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_inequalities(c: &mut Criterion) {
    let mut group = c.benchmark_group("inequalities");

    for inequality in Inequality::ALL {
        group.bench_function(inequality.name(), |b| {
            let mut runner = TrialRunner::seeded(42);
            b.iter(|| black_box(inequality.evaluate(&mut runner).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inequalities);
criterion_main!(benches);
