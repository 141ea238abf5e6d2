use criterion::{black_box, criterion_group, criterion_main, Criterion};
use delve::{
    handle_key, parse_script, FovAlgorithm, FovConfig, GameConfig, GenerationConfig, Generator, RandomSource,
    RoomCorridorGenerator, TurnEngine, VisibilityField,
};

fn bench_generation(c: &mut Criterion) {
    let generator = RoomCorridorGenerator::new();
    let config = GenerationConfig::new(42);

    c.bench_function("generate_level_80x43", |b| {
        b.iter(|| {
            let mut rng = RandomSource::new(black_box(config.seed));
            generator.generate(&config, &mut rng)
        })
    });
}

fn bench_visibility(c: &mut Criterion) {
    let config = GenerationConfig::new(7);
    let mut rng = RandomSource::new(config.seed);
    let level = match RoomCorridorGenerator::new().generate(&config, &mut rng) {
        Ok(level) => level,
        Err(err) => panic!("benchmark level failed to generate: {err}"),
    };
    let mut grid = level.map.grid;

    for algorithm in [FovAlgorithm::SymmetricShadowcast, FovAlgorithm::Raycast] {
        let fov = FovConfig {
            algorithm,
            ..FovConfig::default()
        };
        c.bench_function(&format!("recompute_fov_{algorithm:?}"), |b| {
            b.iter(|| VisibilityField::recompute(&mut grid, black_box(level.player_start), &fov))
        });
    }
}

fn bench_turns(c: &mut Criterion) {
    let keys = match parse_script("llllkkkkhhhhjjjjggyubn") {
        Ok(keys) => keys,
        Err(err) => panic!("bad key script: {err}"),
    };

    c.bench_function("play_22_keys", |b| {
        b.iter(|| {
            let Ok(mut engine) = TurnEngine::new(GameConfig::new(black_box(99))) else {
                return;
            };
            for &key in &keys {
                let _ = engine.handle_intent(&handle_key(key, engine.state()));
            }
        })
    });
}

criterion_group!(benches, bench_generation, bench_visibility, bench_turns);
criterion_main!(benches);
