//! # Dungeon Generation
//!
//! Room-and-corridor layout generation.
//!
//! Rooms are placed at random with collision rejection; each accepted room is
//! joined to the previously accepted one by an L-shaped corridor, so the
//! whole level is connected by induction.

use crate::game::{Entity, GameMap, Position, TileGrid};
use crate::generation::{GeneratedLevel, GenerationConfig, Generator, ItemKind, MonsterKind, Rect};
use crate::utils::{reachable_floor, RandomSource};
use crate::{DelveError, DelveResult};

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates dungeons by:
/// 1. Trying `max_rooms` random rooms, rejecting any that touch an earlier one
/// 2. Carving an L-shaped corridor from each new room to the previous one
/// 3. Spawning monsters and items in every room but the first
/// 4. Optionally checking connectivity before returning
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether to validate the level before handing it out
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GenerationConfig, Generator, RandomSource, RoomCorridorGenerator, TileType};
    ///
    /// let config = GenerationConfig::for_testing(7);
    /// let mut rng = RandomSource::new(config.seed);
    /// let level = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
    ///
    /// let start = level.map.grid.get_tile(level.player_start).unwrap();
    /// assert_eq!(start.tile_type, TileType::Floor);
    /// ```
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    /// Draws one candidate room that fits inside the map.
    fn random_room(&self, config: &GenerationConfig, rng: &mut RandomSource) -> Rect {
        let min = config.room_min_size as i32;
        let max = config.room_max_size as i32;
        let width = rng.range_inclusive(min, max);
        let height = rng.range_inclusive(min, max);
        let x = rng.range_inclusive(0, config.width as i32 - width - 1);
        let y = rng.range_inclusive(0, config.height as i32 - height - 1);
        Rect::new(x, y, width, height)
    }

    fn carve_room(&self, grid: &mut TileGrid, room: &Rect) {
        for pos in room.floor_positions() {
            grid.carve(pos);
        }
    }

    fn carve_h_tunnel(&self, grid: &mut TileGrid, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            grid.carve(Position::new(x, y));
        }
    }

    fn carve_v_tunnel(&self, grid: &mut TileGrid, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            grid.carve(Position::new(x, y));
        }
    }

    /// Carves an L-shaped corridor between two room centres. A coin flip
    /// decides whether the horizontal leg comes first.
    fn carve_l_corridor(&self, grid: &mut TileGrid, from: Position, to: Position, rng: &mut RandomSource) {
        if rng.coin_flip() {
            self.carve_h_tunnel(grid, from.x, to.x, from.y);
            self.carve_v_tunnel(grid, from.y, to.y, to.x);
        } else {
            self.carve_v_tunnel(grid, from.y, to.y, from.x);
            self.carve_h_tunnel(grid, from.x, to.x, to.y);
        }
    }

    /// Spawns up to the configured number of monsters and items at random
    /// floor positions of `room`. Positions already taken are skipped.
    fn place_entities(
        &self,
        room: &Rect,
        config: &GenerationConfig,
        rng: &mut RandomSource,
        player_start: Position,
        entities: &mut Vec<Entity>,
    ) {
        let occupied = |entities: &[Entity], pos: Position| {
            pos == player_start || entities.iter().any(|entity| entity.position == pos)
        };

        let monsters = rng.range_inclusive(0, config.max_monsters_per_room as i32);
        for _ in 0..monsters {
            let pos = self.random_floor_in(room, rng);
            if !occupied(entities, pos) {
                entities.push(MonsterKind::choose(rng).spawn(pos));
            }
        }

        let items = rng.range_inclusive(0, config.max_items_per_room as i32);
        for _ in 0..items {
            let pos = self.random_floor_in(room, rng);
            if !occupied(entities, pos) {
                entities.push(ItemKind::choose(rng).spawn(pos));
            }
        }
    }

    fn random_floor_in(&self, room: &Rect, rng: &mut RandomSource) -> Position {
        Position::new(
            rng.range_inclusive(room.x1 + 1, room.x2 - 1),
            rng.range_inclusive(room.y1 + 1, room.y2 - 1),
        )
    }
}

impl Generator<GeneratedLevel> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut RandomSource) -> DelveResult<GeneratedLevel> {
        config.validate()?;

        let mut map = GameMap::new(config.width, config.height);
        let mut entities = Vec::new();
        let mut player_start = None;

        for attempt in 0..config.max_rooms {
            let room = self.random_room(config, rng);
            if map.rooms.iter().any(|other| room.intersects(other)) {
                log::trace!("room attempt {attempt} rejected: overlaps an earlier room");
                continue;
            }

            self.carve_room(&mut map.grid, &room);
            let center = room.center();

            match (map.rooms.last().map(Rect::center), player_start) {
                (Some(previous), Some(start)) => {
                    self.carve_l_corridor(&mut map.grid, previous, center, rng);
                    self.place_entities(&room, config, rng, start, &mut entities);
                }
                _ => player_start = Some(center),
            }
            map.rooms.push(room);
        }

        let player_start = player_start
            .ok_or_else(|| DelveError::GenerationFailed("no room could be placed".to_string()))?;

        let level = GeneratedLevel {
            map,
            player_start,
            entities,
        };
        if self.ensure_connectivity {
            self.validate(&level, config)?;
        }

        log::info!(
            "generated {}x{} level (seed {}): {} rooms, {} spawns",
            config.width,
            config.height,
            rng.seed(),
            level.map.rooms.len(),
            level.entities.len()
        );
        Ok(level)
    }

    fn validate(&self, level: &GeneratedLevel, _config: &GenerationConfig) -> DelveResult<()> {
        let grid = &level.map.grid;

        if level.map.rooms.is_empty() {
            return Err(DelveError::GenerationFailed("level has no rooms".to_string()));
        }
        if grid.is_blocked(level.player_start) {
            return Err(DelveError::GenerationFailed(
                "player start is not a floor tile".to_string(),
            ));
        }

        for (i, room) in level.map.rooms.iter().enumerate() {
            if level.map.rooms[i + 1..].iter().any(|other| room.intersects(other)) {
                return Err(DelveError::GenerationFailed(format!("room {i} overlaps another room")));
            }
        }

        let reachable = reachable_floor(grid, level.player_start);
        let floor_count = grid.floor_positions().count();
        if reachable.len() != floor_count {
            return Err(DelveError::GenerationFailed(format!(
                "{} of {} floor tiles are unreachable from the start",
                floor_count - reachable.len(),
                floor_count
            )));
        }

        for (i, entity) in level.entities.iter().enumerate() {
            if grid.is_blocked(entity.position) {
                return Err(DelveError::GenerationFailed(format!(
                    "{} spawned inside a wall",
                    entity.name
                )));
            }
            let stacked = level.entities[i + 1..]
                .iter()
                .any(|other| other.position == entity.position);
            if stacked || entity.position == level.player_start {
                return Err(DelveError::GenerationFailed(format!(
                    "{} shares its tile with another entity",
                    entity.name
                )));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
