//! # Field of View
//!
//! Computes which tiles the player can currently see and records it on the
//! tile grid. The default algorithm is symmetric shadowcasting: if floor tile
//! A sees floor tile B, then B sees A. Slopes are kept as exact fractions so
//! the result never depends on floating-point rounding.

use crate::game::{FovConfig, Position, TileGrid};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Available visibility algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FovAlgorithm {
    /// Symmetric recursive shadowcasting (scanned iteratively)
    #[default]
    SymmetricShadowcast,
    /// One Bresenham ray per tile in range. Cheaper to reason about, not symmetric.
    Raycast,
}

/// Visibility solver.
pub struct VisibilityField;

impl VisibilityField {
    /// Clears every tile's `visible` flag, then marks the tiles visible from
    /// `origin` under `config`. Newly visible tiles become explored.
    pub fn recompute(grid: &mut TileGrid, origin: Position, config: &FovConfig) {
        let visible = Self::compute(grid, origin, config);
        grid.clear_visibility();
        for pos in visible {
            if let Some(tile) = grid.get_tile_mut(pos) {
                tile.set_visible(true);
            }
        }
        log::debug!("visibility recomputed from ({}, {})", origin.x, origin.y);
    }

    /// The set of positions visible from `origin`, without touching the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{FovConfig, Position, Tile, TileGrid, VisibilityField};
    ///
    /// let mut grid = TileGrid::new(7, 3);
    /// for x in 1..6 {
    ///     grid.set_tile(Position::new(x, 1), Tile::floor()).unwrap();
    /// }
    ///
    /// let seen = VisibilityField::compute(&grid, Position::new(1, 1), &FovConfig::default());
    /// assert!(seen.contains(&Position::new(5, 1)));
    /// assert!(seen.contains(&Position::new(6, 1))); // lit wall at the corridor end
    /// ```
    pub fn compute(grid: &TileGrid, origin: Position, config: &FovConfig) -> HashSet<Position> {
        let mut visible = HashSet::new();
        if !grid.is_valid_position(origin) {
            return visible;
        }
        visible.insert(origin);

        let radius = config.radius as i32;
        match config.algorithm {
            FovAlgorithm::SymmetricShadowcast => {
                for quadrant in Quadrant::ALL {
                    shadowcast_quadrant(grid, origin, radius, config.light_walls, quadrant, &mut visible);
                }
            }
            FovAlgorithm::Raycast => raycast(grid, origin, radius, config.light_walls, &mut visible),
        }
        visible
    }
}

/// Exact rational slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the near-side edge of tile `col` in row `depth`.
    fn of_tile(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    /// `depth * start`, rounded with ties going up.
    fn min_col(&self) -> i32 {
        (2 * self.depth * self.start.num + self.start.den).div_euclid(2 * self.start.den)
    }

    /// `depth * end`, rounded with ties going down.
    fn max_col(&self) -> i32 {
        -((self.end.den - 2 * self.depth * self.end.num).div_euclid(2 * self.end.den))
    }

    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Whether the centre of tile `col` lies inside this row's sector.
    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}

#[derive(Debug, Clone, Copy)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Quadrant::North, Quadrant::East, Quadrant::South, Quadrant::West];

    fn transform(self, origin: Position, depth: i32, col: i32) -> Position {
        match self {
            Quadrant::North => Position::new(origin.x + col, origin.y - depth),
            Quadrant::South => Position::new(origin.x + col, origin.y + depth),
            Quadrant::East => Position::new(origin.x + depth, origin.y + col),
            Quadrant::West => Position::new(origin.x - depth, origin.y + col),
        }
    }
}

fn in_radius(origin: Position, pos: Position, radius: i32) -> bool {
    origin.distance_squared(pos) <= radius * radius
}

fn reveal(
    grid: &TileGrid,
    origin: Position,
    pos: Position,
    radius: i32,
    light_walls: bool,
    visible: &mut HashSet<Position>,
) {
    if !grid.is_valid_position(pos) || !in_radius(origin, pos, radius) {
        return;
    }
    if grid.blocks_sight(pos) && !light_walls {
        return;
    }
    visible.insert(pos);
}

fn shadowcast_quadrant(
    grid: &TileGrid,
    origin: Position,
    radius: i32,
    light_walls: bool,
    quadrant: Quadrant,
    visible: &mut HashSet<Position>,
) {
    let mut rows = vec![Row {
        depth: 1,
        start: Slope::new(-1, 1),
        end: Slope::new(1, 1),
    }];

    while let Some(mut row) = rows.pop() {
        if row.depth > radius {
            continue;
        }

        // None before the first tile, then whether the previous tile was a wall.
        let mut prev_wall: Option<bool> = None;
        for col in row.min_col()..=row.max_col() {
            let pos = quadrant.transform(origin, row.depth, col);
            let is_wall = grid.blocks_sight(pos);

            if is_wall || row.is_symmetric(col) {
                reveal(grid, origin, pos, radius, light_walls, visible);
            }
            if prev_wall == Some(true) && !is_wall {
                row.start = Slope::of_tile(row.depth, col);
            }
            if prev_wall == Some(false) && is_wall {
                let mut next = row.next();
                next.end = Slope::of_tile(row.depth, col);
                rows.push(next);
            }
            prev_wall = Some(is_wall);
        }

        if prev_wall == Some(false) {
            rows.push(row.next());
        }
    }
}

fn raycast(
    grid: &TileGrid,
    origin: Position,
    radius: i32,
    light_walls: bool,
    visible: &mut HashSet<Position>,
) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let target = Position::new(origin.x + dx, origin.y + dy);
            if target == origin || !grid.is_valid_position(target) || !in_radius(origin, target, radius) {
                continue;
            }
            if has_line_of_sight(grid, origin, target) {
                reveal(grid, origin, target, radius, light_walls, visible);
            }
        }
    }
}

/// Bresenham line from `from` to `to`. Sight stops at the first opaque tile;
/// that tile itself counts as seen only when it is the target.
fn has_line_of_sight(grid: &TileGrid, from: Position, to: Position) -> bool {
    let (mut x, mut y) = (from.x, from.y);
    let dx = (to.x - x).abs();
    let dy = -(to.y - y).abs();
    let sx = if x < to.x { 1 } else { -1 };
    let sy = if y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let pos = Position::new(x, y);
        if pos != from && grid.blocks_sight(pos) {
            return pos == to;
        }
        if pos == to {
            return true;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
