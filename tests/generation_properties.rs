//! Property tests for level generation.
//!
//! Invariants that must hold for every seed:
//! - the player starts on floor
//! - every floor tile is reachable from the start
//! - accepted rooms never overlap
//! - the same seed always yields the same level

use delve::{
    reachable_floor, GeneratedLevel, GenerationConfig, Generator, RandomSource, RoomCorridorGenerator, TileType,
};
use proptest::prelude::*;

fn generate(config: &GenerationConfig) -> GeneratedLevel {
    let mut rng = RandomSource::new(config.seed);
    RoomCorridorGenerator::new()
        .generate(config, &mut rng)
        .expect("generation succeeds for a valid config")
}

fn narrow_config(seed: u64) -> GenerationConfig {
    GenerationConfig {
        width: 30,
        height: 43,
        max_rooms: 30,
        ..GenerationConfig::new(seed)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_player_starts_on_floor(seed in any::<u64>()) {
        let level = generate(&GenerationConfig::new(seed));
        let start = level.map.grid.get_tile(level.player_start).map(|tile| tile.tile_type);
        prop_assert_eq!(start, Some(TileType::Floor));
    }

    #[test]
    fn prop_all_floor_is_connected(seed in any::<u64>()) {
        let level = generate(&narrow_config(seed));
        let grid = &level.map.grid;
        let reachable = reachable_floor(grid, level.player_start);
        for pos in grid.floor_positions() {
            prop_assert!(reachable.contains(&pos), "({}, {}) unreachable for seed {}", pos.x, pos.y, seed);
        }
    }

    #[test]
    fn prop_rooms_do_not_overlap(seed in any::<u64>()) {
        let level = generate(&GenerationConfig::new(seed));
        let rooms = &level.map.rooms;
        prop_assert!(!rooms.is_empty());
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                prop_assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn prop_spawns_stand_on_distinct_floor(seed in any::<u64>()) {
        let level = generate(&GenerationConfig::new(seed));
        let mut seen = std::collections::HashSet::new();
        seen.insert(level.player_start);
        for entity in &level.entities {
            prop_assert!(!level.map.is_blocked(entity.position));
            prop_assert!(seen.insert(entity.position), "two entities share {:?}", entity.position);
        }
    }

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>()) {
        let config = narrow_config(seed);
        let first = generate(&config);
        let second = generate(&config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_small_maps_still_generate(seed in any::<u64>(), size in 4u32..8) {
        let config = GenerationConfig {
            width: size + 2,
            height: size + 2,
            room_min_size: 2,
            room_max_size: size,
            ..GenerationConfig::for_testing(seed)
        };
        let level = generate(&config);
        prop_assert!(!level.map.is_blocked(level.player_start));
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = generate(&GenerationConfig::new(1));
    let b = generate(&GenerationConfig::new(2));
    assert_ne!(a.map, b.map);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GenerationConfig {
        room_max_size: 50,
        ..GenerationConfig::new(1)
    };
    let mut rng = RandomSource::new(1);
    assert!(RoomCorridorGenerator::new().generate(&config, &mut rng).is_err());
}
