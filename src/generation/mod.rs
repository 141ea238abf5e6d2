//! # Generation Module
//!
//! Procedural level generation: room layout, corridors, and the monsters and
//! items spawned into the rooms.
//!
//! Generation is a pure function of its configuration and [`RandomSource`]:
//! the same seed always yields the same tiles and the same spawns.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config;
use crate::game::{Entity, GameMap, Position};
use crate::utils::RandomSource;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub width: u32,
    /// Map height in tiles
    pub height: u32,
    /// Number of room placement attempts
    pub max_rooms: u32,
    /// Minimum room side, walls included
    pub room_min_size: u32,
    /// Maximum room side, walls included
    pub room_max_size: u32,
    /// Upper bound of monsters spawned per room
    pub max_monsters_per_room: u32,
    /// Upper bound of items spawned per room
    pub max_items_per_room: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert!(config.room_min_size >= 2);
    /// assert!(config.room_max_size >= config.room_min_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::DEFAULT_DUNGEON_WIDTH,
            height: config::DEFAULT_DUNGEON_HEIGHT,
            max_rooms: config::DEFAULT_MAX_ROOMS,
            room_min_size: config::DEFAULT_ROOM_MIN_SIZE,
            room_max_size: config::DEFAULT_ROOM_MAX_SIZE,
            max_monsters_per_room: config::DEFAULT_MAX_MONSTERS_PER_ROOM,
            max_items_per_room: config::DEFAULT_MAX_ITEMS_PER_ROOM,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 40,
            height: 30,
            max_rooms: 10,
            room_min_size: 4,
            room_max_size: 8,
            max_monsters_per_room: 2,
            max_items_per_room: 1,
        }
    }

    /// Checks that rooms of every allowed size fit on the map.
    pub fn validate(&self) -> DelveResult<()> {
        let fits_i32 = |side: u32| i32::try_from(side).is_ok();
        if !fits_i32(self.width) || !fits_i32(self.height) || self.width.checked_mul(self.height).is_none() {
            return Err(DelveError::InvalidConfig(format!(
                "a {}x{} map is too large",
                self.width, self.height
            )));
        }
        if self.room_min_size < 2 {
            return Err(DelveError::InvalidConfig(
                "rooms need a side of at least 2 to have a floor".to_string(),
            ));
        }
        if self.room_max_size < self.room_min_size {
            return Err(DelveError::InvalidConfig(format!(
                "room_max_size {} is smaller than room_min_size {}",
                self.room_max_size, self.room_min_size
            )));
        }
        if self.room_max_size >= self.width || self.room_max_size >= self.height {
            return Err(DelveError::InvalidConfig(format!(
                "rooms up to {} tiles do not fit a {}x{} map",
                self.room_max_size, self.width, self.height
            )));
        }
        if self.max_rooms == 0 {
            return Err(DelveError::InvalidConfig("max_rooms must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Axis-aligned rectangle used during room placement.
///
/// `(x1, y1)` and `(x2, y2)` are the wall corners; the floor is the strict
/// interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Rect};
    ///
    /// let room = Rect::new(5, 5, 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// assert!(room.contains_floor(Position::new(6, 6)));
    /// assert!(!room.contains_floor(Position::new(5, 5))); // wall corner
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Whether the two rectangles touch or overlap, walls included. Rooms
    /// passing this check keep at least one wall tile between them.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub fn contains_floor(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// All interior (floor) positions, row by row.
    pub fn floor_positions(&self) -> Vec<Position> {
        ((self.y1 + 1)..self.y2)
            .flat_map(|y| ((self.x1 + 1)..self.x2).map(move |x| Position::new(x, y)))
            .collect()
    }
}

/// Output of a level generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub map: GameMap,
    pub player_start: Position,
    /// Monsters and items, in spawn order
    pub entities: Vec<Entity>,
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate(&self, config: &GenerationConfig, rng: &mut RandomSource) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}
