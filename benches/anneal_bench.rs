//! Criterion benchmarks for the surgery annealer.
//!
//! Uses synthetic instances with a fixed share of special-requirement
//! cases to measure neighbor generation and full runs as size grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_surgery::model::{RoomSet, SurgeryRequest, TuningParameters};
use u_surgery::sa::{AnnealConfig, Temperature};
use u_surgery::surgery::{Scheduler, SurgeryProblem};

// ===========================================================================
// Synthetic instances
// ===========================================================================

fn instance(rooms: usize, requests: usize, seed: u64) -> (RoomSet, Vec<SurgeryRequest>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..rooms).map(|i| format!("OR{i:02}")).collect();
    let special: Vec<String> = names[..(rooms / 4).max(1)].to_vec();
    let requests = (0..requests)
        .map(|i| {
            SurgeryRequest::new(
                format!("A{i:04}"),
                names[i % rooms].clone(),
                rng.random_range(30..360),
                rng.random_bool(0.15),
            )
        })
        .collect();
    (RoomSet::new(names, special).unwrap(), requests)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_perturb(c: &mut Criterion) {
    let mut group = c.benchmark_group("perturb");

    for (rooms, requests) in [(4usize, 20usize), (10, 60), (20, 200)] {
        let (room_set, reqs) = instance(rooms, requests, 42);
        let problem = SurgeryProblem::new(room_set, reqs, TuningParameters::default()).unwrap();
        let schedule = problem.initial_schedule();
        let hot = Temperature::new(900.0, 1000.0, 0.01);
        let mut rng = StdRng::seed_from_u64(7);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("r{rooms}_n{requests}")),
            &schedule,
            |b, s| b.iter(|| black_box(problem.perturb(black_box(s), &hot, &mut rng))),
        );
    }
    group.finish();
}

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");
    group.sample_size(10);

    for (rooms, requests) in [(3usize, 12usize), (5, 30), (8, 60)] {
        let (room_set, reqs) = instance(rooms, requests, 42);
        let scheduler = Scheduler::new(
            room_set,
            reqs,
            TuningParameters::default(),
            AnnealConfig::default().with_seed(42),
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("r{rooms}_n{requests}")),
            &scheduler,
            |b, s| {
                b.iter(|| {
                    let outcome = s.schedule().unwrap();
                    black_box(outcome)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_perturb, bench_schedule);
criterion_main!(benches);
