use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::{Game, GameConfig, MinefieldGenerator, ReservoirGenerator};

const TIERS: [((u8, u8), u16); 3] = [((9, 9), 10), ((16, 16), 40), ((30, 16), 99)];

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    for (size, mines) in TIERS {
        let config = GameConfig::new(size, mines).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}/{}", size.0, size.1, mines)),
            &config,
            |b, &config| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    black_box(ReservoirGenerator::new(seed, (4, 4)).generate(black_box(config)))
                })
            },
        );
    }
    group.finish();
}

fn bench_opening_cascade(c: &mut Criterion) {
    // sparse board so the first explore floods most of it
    let config = GameConfig::new((200, 200), 400).unwrap();
    c.bench_function("opening_cascade_200x200", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut game = Game::new(config, seed).unwrap();
            black_box(game.explore(black_box((100, 100))))
        })
    });
}

criterion_group!(benches, bench_generation, bench_opening_cascade);
criterion_main!(benches);
