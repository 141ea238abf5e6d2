//! # Input Module
//!
//! Decodes key presses into [`Intent`]s. This belongs to the presentation
//! side: the turn engine never sees a key, only the intents produced here.

pub mod commands;

pub use commands::*;

use crate::game::{Direction, GameState, Intent};

/// Key-to-intent decoder.
///
/// Which keys mean something depends on the current state; anything unmapped
/// decodes to an empty intent.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjklyubn)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, GameState, InputHandler, Intent, Key};
    ///
    /// let input_handler = InputHandler::new();
    /// let intent = input_handler.handle_key(Key::Char('k'), GameState::PlayersTurn);
    /// assert_eq!(intent, Intent::movement(Direction::North));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Decodes `key` for the given state.
    pub fn handle_key(&self, key: Key, state: GameState) -> Intent {
        match key {
            Key::AltEnter => return Intent::fullscreen(),
            Key::Escape => return Intent::exit(),
            _ => {}
        }

        match state {
            GameState::PlayersTurn => self.players_turn_key(key),
            GameState::PlayerDead => match key {
                Key::Char('i') => Intent::show_inventory(),
                _ => Intent::default(),
            },
            GameState::ShowInventory | GameState::DropInventory => match key {
                Key::Char(c @ 'a'..='z') => Intent::inventory_index(c as usize - 'a' as usize),
                _ => Intent::default(),
            },
            GameState::EnemyTurn => Intent::default(),
        }
    }

    fn players_turn_key(&self, key: Key) -> Intent {
        if let Some(direction) = self.movement_key(key) {
            return Intent::movement(direction);
        }
        match key {
            Key::Char('g') => Intent::pickup(),
            Key::Char('i') => Intent::show_inventory(),
            Key::Char('d') => Intent::drop_inventory(),
            _ => Intent::default(),
        }
    }

    fn movement_key(&self, key: Key) -> Option<Direction> {
        let direction = match key {
            Key::Up | Key::Char('8') => Direction::North,
            Key::Down | Key::Char('2') => Direction::South,
            Key::Left | Key::Char('4') => Direction::West,
            Key::Right | Key::Char('6') => Direction::East,
            Key::Char('7') => Direction::Northwest,
            Key::Char('9') => Direction::Northeast,
            Key::Char('1') => Direction::Southwest,
            Key::Char('3') => Direction::Southeast,
            Key::Char(c) if self.vi_keys_enabled => match c {
                'k' => Direction::North,
                'j' => Direction::South,
                'h' => Direction::West,
                'l' => Direction::East,
                'y' => Direction::Northwest,
                'u' => Direction::Northeast,
                'b' => Direction::Southwest,
                'n' => Direction::Southeast,
                _ => return None,
            },
            _ => return None,
        };
        Some(direction)
    }
}

/// Decodes `key` with the default keymap.
pub fn handle_key(key: Key, state: GameState) -> Intent {
    InputHandler::new().handle_key(key, state)
}
