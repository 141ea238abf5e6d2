//! # Intents and Turn Outcomes
//!
//! The data crossing the boundary between a presenter and the turn engine.
//! Presenters decode raw input into an [`Intent`]; the engine answers every
//! intent with a [`TurnOutcome`].

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// One decoded player input.
///
/// Every field is optional; an all-empty intent is a no-op cycle. When several
/// fields are set they are processed in declaration order.
///
/// # Examples
///
/// ```
/// use delve::{Direction, Intent};
///
/// let intent = Intent::movement(Direction::North);
/// assert_eq!(intent.movement, Some(Direction::North));
/// assert!(!intent.is_empty());
/// assert!(Intent::default().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intent {
    pub movement: Option<Direction>,
    pub pickup: bool,
    pub show_inventory: bool,
    pub drop_inventory: bool,
    /// Slot selected in an open inventory menu
    pub inventory_index: Option<usize>,
    pub exit: bool,
    /// Passed through to the presenter untouched
    pub fullscreen: bool,
}

impl Intent {
    pub fn movement(direction: Direction) -> Self {
        Self {
            movement: Some(direction),
            ..Self::default()
        }
    }

    pub fn pickup() -> Self {
        Self {
            pickup: true,
            ..Self::default()
        }
    }

    pub fn show_inventory() -> Self {
        Self {
            show_inventory: true,
            ..Self::default()
        }
    }

    pub fn drop_inventory() -> Self {
        Self {
            drop_inventory: true,
            ..Self::default()
        }
    }

    pub fn inventory_index(index: usize) -> Self {
        Self {
            inventory_index: Some(index),
            ..Self::default()
        }
    }

    pub fn exit() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }

    pub fn fullscreen() -> Self {
        Self {
            fullscreen: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What the presenter needs to know after an intent was resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// The player asked to leave the game
    pub quit: bool,
    /// The player asked to toggle fullscreen
    pub toggle_fullscreen: bool,
    /// The visibility field changed this cycle
    pub fov_recomputed: bool,
    /// The enemy phase ran
    pub player_turn_consumed: bool,
}
