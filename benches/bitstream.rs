//! Benchmarks for SDA bit generation and the steady-state search step.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use sda_mapgen::{
    automaton::BitStream,
    evolve::{EvolveRng, OnesDensity, SearchEngine},
    schema::SearchConfig,
};

fn bench_next_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_bits");

    for states in [4, 12, 32] {
        let mut rng = EvolveRng::new(42);
        let genome = rng.random_genome(states);

        group.bench_with_input(BenchmarkId::from_parameter(states), &states, |b, _| {
            b.iter(|| {
                let mut stream = BitStream::new(black_box(&genome));
                stream.next_bits(black_box(4096))
            });
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let config = SearchConfig {
        generations: 0,
        report_interval: 0,
        random_seed: Some(42),
        ..SearchConfig::default()
    };
    let mut engine = SearchEngine::new(config, OnesDensity::new(100)).unwrap();

    c.bench_function("steady_state_update", |b| {
        b.iter(|| engine.update());
    });
}

criterion_group!(benches, bench_next_bits, bench_update);
criterion_main!(benches);
