//! # Game State Module
//!
//! The turn state machine's states, and the slot holding the current one
//! together with the state a menu returns to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    PlayersTurn,
    EnemyTurn,
    PlayerDead,
    ShowInventory,
    DropInventory,
}

impl GameState {
    pub fn is_menu(self) -> bool {
        matches!(self, GameState::ShowInventory | GameState::DropInventory)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::PlayersTurn => "Player's turn",
            GameState::EnemyTurn => "Enemy turn",
            GameState::PlayerDead => "Dead",
            GameState::ShowInventory => "Inventory",
            GameState::DropInventory => "Drop item",
        };
        f.write_str(name)
    }
}

/// Current state plus, while a menu is open, the state to return to.
///
/// The return state only exists inside the `ActiveWithReturn` variant, so it
/// cannot outlive the menu that needs it.
///
/// # Examples
///
/// ```
/// use delve::{GameState, StateSlot};
///
/// let mut slot = StateSlot::new(GameState::PlayersTurn);
/// slot.open_menu(GameState::DropInventory);
/// assert_eq!(slot.current(), GameState::DropInventory);
///
/// slot.cancel();
/// assert_eq!(slot.current(), GameState::PlayersTurn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateSlot {
    Active(GameState),
    ActiveWithReturn { state: GameState, return_to: GameState },
}

impl StateSlot {
    pub fn new(state: GameState) -> Self {
        StateSlot::Active(state)
    }

    pub fn current(&self) -> GameState {
        match *self {
            StateSlot::Active(state) | StateSlot::ActiveWithReturn { state, .. } => state,
        }
    }

    /// The state a cancel would restore, if a menu is open.
    pub fn return_state(&self) -> Option<GameState> {
        match *self {
            StateSlot::Active(_) => None,
            StateSlot::ActiveWithReturn { return_to, .. } => Some(return_to),
        }
    }

    /// Opens `menu`. Switching between menus keeps the original return state.
    pub fn open_menu(&mut self, menu: GameState) {
        let return_to = self.return_state().unwrap_or_else(|| self.current());
        *self = StateSlot::ActiveWithReturn {
            state: menu,
            return_to,
        };
    }

    /// Closes an open menu. Returns false when no menu was open.
    pub fn cancel(&mut self) -> bool {
        match self.return_state() {
            Some(return_to) => {
                *self = StateSlot::Active(return_to);
                true
            }
            None => false,
        }
    }

    /// Replaces the current state, discarding any menu return state.
    pub fn set(&mut self, state: GameState) {
        *self = StateSlot::Active(state);
    }
}

impl Default for StateSlot {
    fn default() -> Self {
        Self::new(GameState::PlayersTurn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_restores_enemy_turn() {
        let mut slot = StateSlot::new(GameState::EnemyTurn);
        slot.open_menu(GameState::ShowInventory);
        assert_eq!(slot.return_state(), Some(GameState::EnemyTurn));

        assert!(slot.cancel());
        assert_eq!(slot, StateSlot::Active(GameState::EnemyTurn));
        assert!(!slot.cancel(), "nothing left to cancel");
    }

    #[test]
    fn test_switching_menus_keeps_return_state() {
        let mut slot = StateSlot::new(GameState::PlayerDead);
        slot.open_menu(GameState::ShowInventory);
        slot.open_menu(GameState::DropInventory);

        assert_eq!(slot.current(), GameState::DropInventory);
        assert_eq!(slot.return_state(), Some(GameState::PlayerDead));
    }

    #[test]
    fn test_set_discards_return_state() {
        let mut slot = StateSlot::default();
        slot.open_menu(GameState::ShowInventory);
        slot.set(GameState::EnemyTurn);
        assert_eq!(slot.return_state(), None);
        assert!(GameState::ShowInventory.is_menu());
        assert!(!GameState::PlayerDead.is_menu());
    }
}
