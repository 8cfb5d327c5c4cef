use criterion::{Criterion, criterion_group, criterion_main};
use latsim_core::life;
use latsim_core::sirs::{self, SirsProbabilities};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn bench_life_step(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x1157A7E);
    let lattice = life::random_lattice(50, &mut rng).expect("lattice");
    c.bench_function("life_step_50", |b| {
        b.iter(|| life::step(black_box(&lattice)))
    });
}

fn bench_sirs_sweep(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x51C5);
    let mut lattice = sirs::random_lattice(50, &mut rng).expect("lattice");
    let probabilities = SirsProbabilities::dynamic_equilibrium();
    c.bench_function("sirs_sweep_50", |b| {
        b.iter(|| sirs::sweep(black_box(&mut lattice), &probabilities, &mut rng))
    });
}

criterion_group!(benches, bench_life_step, bench_sirs_sweep);
criterion_main!(benches);
