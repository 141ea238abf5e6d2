//! # Game Settings
//!
//! Constructor-time configuration for the turn engine. Values are copied into
//! the engine once and never re-read.

use crate::config;
use crate::game::FovAlgorithm;
use crate::generation::GenerationConfig;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Visibility parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovConfig {
    /// Sight radius in tiles (Euclidean)
    pub radius: u32,
    /// Whether walls bordering the visible area are themselves shown
    pub light_walls: bool,
    pub algorithm: FovAlgorithm,
}

impl Default for FovConfig {
    fn default() -> Self {
        Self {
            radius: config::DEFAULT_FOV_RADIUS,
            light_walls: true,
            algorithm: FovAlgorithm::default(),
        }
    }
}

/// Starting combat statistics of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            hp: config::DEFAULT_PLAYER_HEALTH,
            defense: config::DEFAULT_PLAYER_DEFENSE,
            power: config::DEFAULT_PLAYER_POWER,
        }
    }
}

/// Everything the engine needs to start a game.
///
/// # Examples
///
/// ```
/// use delve::GameConfig;
///
/// let config = GameConfig::from_json_str(r#"{ "generation": { "seed": 9 }, "inventory_capacity": 10 }"#).unwrap();
/// assert_eq!(config.generation.seed, 9);
/// assert_eq!(config.inventory_capacity, 10);
/// assert_eq!(config.fov.radius, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub fov: FovConfig,
    pub inventory_capacity: usize,
    pub player: PlayerStats,
    /// Maximum retained log lines; `None` keeps everything
    pub message_log_capacity: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

impl GameConfig {
    /// Default configuration with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::new(seed),
            fov: FovConfig::default(),
            inventory_capacity: config::DEFAULT_INVENTORY_CAPACITY,
            player: PlayerStats::default(),
            message_log_capacity: None,
        }
    }

    /// Small maps for fast tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::for_testing(seed),
            ..Self::new(seed)
        }
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> DelveResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load_from_json(path: impl AsRef<Path>) -> DelveResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> DelveResult<()> {
        self.generation.validate()?;
        if self.fov.radius == 0 {
            return Err(DelveError::InvalidConfig("fov radius must be at least 1".to_string()));
        }
        if self.inventory_capacity == 0 {
            return Err(DelveError::InvalidConfig(
                "inventory capacity must be at least 1".to_string(),
            ));
        }
        if self.player.hp <= 0 {
            return Err(DelveError::InvalidConfig("player hp must be positive".to_string()));
        }
        if self.message_log_capacity == Some(0) {
            return Err(DelveError::InvalidConfig(
                "message log capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
