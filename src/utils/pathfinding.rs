//! # Pathfinding Algorithms
//!
//! Movement and reachability helpers for AI and generation checks.

use crate::game::{Position, TileGrid};
use ::pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Picks one step from `from` that strictly shortens the straight-line
/// distance to `target`, or `None` if every such step is blocked.
///
/// The step pointing most directly at the target is tried first. Otherwise
/// the unblocked step landing closest to the target wins, preferring steps
/// along the axis with the larger delta.
///
/// # Examples
///
/// ```
/// use delve::{step_towards, Position};
///
/// let step = step_towards(Position::new(0, 0), Position::new(5, 1), |_| false);
/// assert_eq!(step, Some(Position::new(1, 0)));
/// ```
pub fn step_towards(
    from: Position,
    target: Position,
    is_blocked: impl Fn(Position) -> bool,
) -> Option<Position> {
    let offset = target - from;
    if offset == Position::new(0, 0) {
        return None;
    }

    let distance = from.euclidean_distance(target);
    let direct = Position::new(
        (f64::from(offset.x) / distance).round() as i32,
        (f64::from(offset.y) / distance).round() as i32,
    );
    let x_is_major = offset.x.abs() >= offset.y.abs();
    let current = from.distance_squared(target);

    from.adjacent_positions()
        .into_iter()
        .filter(|&next| next.distance_squared(target) < current && !is_blocked(next))
        .min_by_key(|&next| {
            let delta = next - from;
            let along_major = if x_is_major { delta.x != 0 } else { delta.y != 0 };
            (delta != direct, next.distance_squared(target), !along_major)
        })
}

/// Every passable tile reachable from `start` with 4-directional steps.
///
/// Returns an empty set when `start` itself is blocked.
pub fn reachable_floor(grid: &TileGrid, start: Position) -> HashSet<Position> {
    if grid.is_blocked(start) {
        return HashSet::new();
    }
    bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| !grid.is_blocked(next))
            .collect::<Vec<_>>()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;

    #[test]
    fn test_step_prefers_direct_line() {
        let from = Position::new(5, 5);
        assert_eq!(step_towards(from, Position::new(8, 8), |_| false), Some(Position::new(6, 6)));
        assert_eq!(step_towards(from, Position::new(5, 1), |_| false), Some(Position::new(5, 4)));
        assert_eq!(step_towards(from, from, |_| false), None);
    }

    #[test]
    fn test_step_falls_back_to_major_axis() {
        let from = Position::new(0, 0);
        let target = Position::new(4, 3);
        // Direct diagonal blocked: horizontal has the larger delta.
        let step = step_towards(from, target, |pos| pos == Position::new(1, 1));
        assert_eq!(step, Some(Position::new(1, 0)));
    }

    #[test]
    fn test_step_never_increases_distance() {
        let from = Position::new(3, 3);
        let target = Position::new(0, 3);
        // Wall of blockers in front and on both diagonals.
        let blocked = [Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)];
        let step = step_towards(from, target, |pos| blocked.contains(&pos));
        assert_eq!(step, None);
    }

    #[test]
    fn test_reachable_floor_is_four_connected() {
        let mut grid = TileGrid::new(5, 5);
        for pos in [Position::new(1, 1), Position::new(2, 1), Position::new(3, 3)] {
            grid.set_tile(pos, Tile::floor()).unwrap();
        }

        let reachable = reachable_floor(&grid, Position::new(1, 1));
        assert_eq!(reachable.len(), 2);
        assert!(!reachable.contains(&Position::new(3, 3)));

        assert!(reachable_floor(&grid, Position::new(0, 0)).is_empty());
    }
}
