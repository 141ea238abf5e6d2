//! # Delve
//!
//! Simulation core of a turn-based dungeon crawl.
//!
//! ## Architecture Overview
//!
//! The crate owns everything with algorithmic content and leaves presentation
//! to an external shell:
//!
//! - **Generation System**: seeded room-and-corridor layouts plus monster and item spawns
//! - **Visibility**: symmetric shadowcasting over the tile grid
//! - **Entity Store**: actors and items as records with optional components
//! - **Resolvers**: combat, inventory and AI, each producing [`ResultEvent`]s
//! - **Turn Engine**: the state machine that turns an [`Intent`] into state changes
//!
//! The shell feeds one decoded [`Intent`] per cycle into [`TurnEngine::handle_intent`]
//! and reads the tile grid, entity list, message log and current [`GameState`]
//! back out to draw them.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Delve simulation.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration cannot produce a playable game
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Entity id does not refer to a stored entity
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Attack target has no combat capability
    #[error("Entity {0} cannot be attacked: no fighter component")]
    AttackWithoutFighter(EntityId),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 80;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 43;

    /// Default number of room placement attempts
    pub const DEFAULT_MAX_ROOMS: u32 = 30;

    /// Default smallest room side
    pub const DEFAULT_ROOM_MIN_SIZE: u32 = 6;

    /// Default largest room side
    pub const DEFAULT_ROOM_MAX_SIZE: u32 = 10;

    /// Default sight radius
    pub const DEFAULT_FOV_RADIUS: u32 = 10;

    /// Default monsters per room upper bound
    pub const DEFAULT_MAX_MONSTERS_PER_ROOM: u32 = 3;

    /// Default items per room upper bound
    pub const DEFAULT_MAX_ITEMS_PER_ROOM: u32 = 2;

    /// Default number of inventory slots
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 26;

    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: i32 = 30;

    /// Default player defense
    pub const DEFAULT_PLAYER_DEFENSE: i32 = 2;

    /// Default player attack power
    pub const DEFAULT_PLAYER_POWER: i32 = 5;
}
