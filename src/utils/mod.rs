//! # Utilities Module
//!
//! Seeded randomness and pathfinding helpers shared by generation and AI.

pub mod pathfinding;
pub mod random;

pub use self::pathfinding::*;
pub use random::*;
