//! # Trial Benchmarks
//!
//! Measures the raw trial loops and the single-particle operations.
//!
//! Run: `cargo bench --bench trials_bench`

use bell_core::{Electron, PairMode, Photon, SpinAxis, TrialRunner, rng_from_seed};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark particle operations in isolation
fn bench_particles(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles");
    let mut rng = rng_from_seed(Some(1));

    group.bench_function("photon_measure", |b| {
        let mut photon = Photon::new(&mut rng);
        b.iter(|| black_box(photon.measure(black_box(0.7))))
    });

    group.bench_function("photon_entangle_measure", |b| {
        let mut rng = rng_from_seed(Some(2));
        let mut one = Photon::new(&mut rng);
        let mut two = Photon::new(&mut rng);
        b.iter(|| {
            one.randomize(&mut rng);
            two.entangle_with(&one);
            black_box(one.measure(0.0) == two.measure(0.4))
        })
    });

    group.bench_function("electron_measure", |b| {
        let mut rng = rng_from_seed(Some(3));
        let mut electron = Electron::new(&mut rng);
        b.iter(|| black_box(electron.measure(SpinAxis::Y, &mut rng)))
    });

    group.finish();
}

/// Benchmark agreement reductions at several trial counts
fn bench_agreement(c: &mut Criterion) {
    let mut group = c.benchmark_group("agreement");

    for trials in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("photons", trials), &trials, |b, &trials| {
            let mut runner = TrialRunner::seeded(4).with_trials(trials).unwrap();
            b.iter(|| black_box(runner.photon_agreement(0.0, 0.4, PairMode::Entangled)))
        });

        group.bench_with_input(BenchmarkId::new("electrons", trials), &trials, |b, &trials| {
            let mut runner = TrialRunner::seeded(5).with_trials(trials).unwrap();
            b.iter(|| black_box(runner.electron_agreement(SpinAxis::X, SpinAxis::Y, PairMode::Entangled)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_particles, bench_agreement);
criterion_main!(benches);
