//! # Key Definitions
//!
//! Abstract keys as a presenter reports them, and a small text format for
//! scripting key sequences.

use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// A key press, independent of any terminal or windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character, including numpad digits
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// Enter with the Alt modifier held
    AltEnter,
    Escape,
}

/// Parses a key script.
///
/// Every non-whitespace character is a key. Named keys go in angle brackets:
/// `<up>`, `<down>`, `<left>`, `<right>`, `<enter>`, `<alt-enter>`, `<esc>`.
///
/// # Examples
///
/// ```
/// use delve::{parse_script, Key};
///
/// let keys = parse_script("ll g <esc>").unwrap();
/// assert_eq!(keys, vec![Key::Char('l'), Key::Char('l'), Key::Char('g'), Key::Escape]);
/// ```
pub fn parse_script(script: &str) -> DelveResult<Vec<Key>> {
    let mut keys = Vec::new();
    let mut chars = script.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '<' => {
                let name: String = chars.by_ref().take_while(|&c| c != '>').collect();
                keys.push(named_key(&name)?);
            }
            c => keys.push(Key::Char(c)),
        }
    }

    Ok(keys)
}

fn named_key(name: &str) -> DelveResult<Key> {
    match name.to_ascii_lowercase().as_str() {
        "up" => Ok(Key::Up),
        "down" => Ok(Key::Down),
        "left" => Ok(Key::Left),
        "right" => Ok(Key::Right),
        "enter" => Ok(Key::Enter),
        "alt-enter" => Ok(Key::AltEnter),
        "esc" | "escape" => Ok(Key::Escape),
        // A literal '<' is written as "<lt>".
        "lt" => Ok(Key::Char('<')),
        other => Err(DelveError::InvalidConfig(format!("unknown key name <{other}>"))),
    }
}
