//! # Encounter Generation
//!
//! Monster kinds and their spawn weights.

use crate::game::{AiBehavior, Color, Entity, Fighter, Position, RenderOrder};
use crate::utils::RandomSource;

/// Monsters that can appear in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Orc,
    Troll,
}

/// Relative spawn weights. Orcs are common, trolls rare.
pub const MONSTER_TABLE: [(MonsterKind, u32); 2] = [(MonsterKind::Orc, 80), (MonsterKind::Troll, 20)];

impl MonsterKind {
    /// Draws a monster kind from [`MONSTER_TABLE`].
    pub fn choose(rng: &mut RandomSource) -> MonsterKind {
        rng.weighted_choice(&MONSTER_TABLE)
            .copied()
            .unwrap_or(MonsterKind::Orc)
    }

    /// Builds the monster entity standing at `position`.
    pub fn spawn(self, position: Position) -> Entity {
        let (name, glyph, color, fighter) = match self {
            MonsterKind::Orc => ("Orc", 'o', Color::DESATURATED_GREEN, Fighter::new(10, 0, 3)),
            MonsterKind::Troll => ("Troll", 'T', Color::DARKER_GREEN, Fighter::new(16, 1, 4)),
        };
        Entity::new(name, position, glyph, color, true, RenderOrder::Actor)
            .with_fighter(fighter)
            .with_ai(AiBehavior::Chase)
    }
}
