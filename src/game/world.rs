//! # World Representation
//!
//! The tile grid the simulation runs on, and the map that pairs it with the
//! room layout produced by generation.

use crate::game::Position;
use crate::generation::Rect;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// Kind of terrain occupying a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Wall,
    Floor,
}

impl TileType {
    /// Walls stop movement; floors never do.
    pub fn blocks_movement(self) -> bool {
        matches!(self, TileType::Wall)
    }

    /// Walls stop sight; floors never do.
    pub fn blocks_sight(self) -> bool {
        matches!(self, TileType::Wall)
    }
}

/// A single map cell with its visibility bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Sticky: once seen, stays true
    pub explored: bool,
    /// Recomputed on each visibility pass
    pub visible: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            explored: false,
            visible: false,
        }
    }

    pub fn wall() -> Self {
        Self::new(TileType::Wall)
    }

    pub fn floor() -> Self {
        Self::new(TileType::Floor)
    }

    pub fn blocks_movement(&self) -> bool {
        self.tile_type.blocks_movement()
    }

    pub fn blocks_sight(&self) -> bool {
        self.tile_type.blocks_sight()
    }

    /// Sets the visibility flag. Becoming visible also marks the tile explored.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.explored = true;
        }
    }
}

/// Fixed-size 2D grid of tiles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid filled entirely with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, TileGrid, TileType};
    ///
    /// let grid = TileGrid::new(10, 8);
    /// assert_eq!(grid.get_tile(Position::new(3, 3)).unwrap().tile_type, TileType::Wall);
    /// assert!(grid.get_tile(Position::new(10, 0)).is_none());
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); width as usize * height as usize],
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_valid_position(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|idx| self.tiles.get(idx))
    }

    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).and_then(move |idx| self.tiles.get_mut(idx))
    }

    /// Replaces the tile at `pos`.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> DelveResult<()> {
        let slot = self.get_tile_mut(pos).ok_or_else(|| {
            DelveError::InvalidState(format!("position ({}, {}) is outside the map", pos.x, pos.y))
        })?;
        *slot = tile;
        Ok(())
    }

    /// Turns the tile at `pos` into floor, ignoring out-of-bounds positions.
    pub fn carve(&mut self, pos: Position) {
        if let Some(tile) = self.get_tile_mut(pos) {
            tile.tile_type = TileType::Floor;
        }
    }

    /// Out-of-bounds counts as blocked.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(true, Tile::blocks_movement)
    }

    /// Out-of-bounds counts as opaque.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(true, Tile::blocks_sight)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(false, |tile| tile.visible)
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(false, |tile| tile.explored)
    }

    /// Clears the visible flag everywhere, keeping exploration state.
    pub fn clear_visibility(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Iterates over the positions of all floor tiles.
    pub fn floor_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(move |&pos| !self.is_blocked(pos))
    }
}

/// Tile grid plus the rooms that generation carved into it.
///
/// Rooms drive spawn density; nothing else in the simulation depends on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    pub grid: TileGrid,
    pub rooms: Vec<Rect>,
}

impl GameMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: TileGrid::new(width, height),
            rooms: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width
    }

    pub fn height(&self) -> u32 {
        self.grid.height
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_properties() {
        assert!(Tile::wall().blocks_movement());
        assert!(Tile::wall().blocks_sight());
        assert!(!Tile::floor().blocks_movement());
        assert!(!Tile::floor().blocks_sight());
    }

    #[test]
    fn test_visibility_marks_explored() {
        let mut tile = Tile::floor();
        tile.set_visible(true);
        assert!(tile.visible && tile.explored);

        tile.set_visible(false);
        assert!(!tile.visible);
        assert!(tile.explored, "explored flag is sticky");
    }

    #[test]
    fn test_grid_bounds() {
        let mut grid = TileGrid::new(5, 4);
        assert!(grid.is_valid_position(Position::new(4, 3)));
        assert!(!grid.is_valid_position(Position::new(5, 3)));
        assert!(!grid.is_valid_position(Position::new(-1, 0)));

        assert!(grid.is_blocked(Position::new(-1, 0)));
        assert!(grid.set_tile(Position::new(9, 9), Tile::floor()).is_err());

        grid.set_tile(Position::new(2, 2), Tile::floor()).unwrap();
        assert!(!grid.is_blocked(Position::new(2, 2)));
        assert_eq!(grid.floor_positions().count(), 1);
    }

    #[test]
    fn test_clear_visibility_keeps_exploration() {
        let mut grid = TileGrid::new(3, 3);
        grid.get_tile_mut(Position::new(1, 1)).unwrap().set_visible(true);

        grid.clear_visibility();

        assert!(!grid.is_visible(Position::new(1, 1)));
        assert!(grid.is_explored(Position::new(1, 1)));
    }
}
