//! # Rendering Module
//!
//! Text presentation of the engine's renderable state. The simulation never
//! depends on this module; presenters read the map, the entity list and the
//! message log through the engine's accessors.

pub mod display;

pub use display::*;
