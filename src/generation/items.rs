//! # Item Generation
//!
//! Item kinds and their spawn weights.

use crate::game::{Color, Entity, Item, ItemEffect, Position, RenderOrder};
use crate::utils::RandomSource;

/// Items that can appear in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    HealingPotion,
    LightningScroll,
}

/// Relative spawn weights.
pub const ITEM_TABLE: [(ItemKind, u32); 2] = [(ItemKind::HealingPotion, 80), (ItemKind::LightningScroll, 20)];

impl ItemKind {
    /// Draws an item kind from [`ITEM_TABLE`].
    pub fn choose(rng: &mut RandomSource) -> ItemKind {
        rng.weighted_choice(&ITEM_TABLE)
            .copied()
            .unwrap_or(ItemKind::HealingPotion)
    }

    /// Builds the item entity lying at `position`.
    pub fn spawn(self, position: Position) -> Entity {
        let (name, glyph, color, effect) = match self {
            ItemKind::HealingPotion => ("Healing Potion", '!', Color::VIOLET, ItemEffect::Heal { amount: 4 }),
            ItemKind::LightningScroll => (
                "Lightning Scroll",
                '#',
                Color::YELLOW,
                ItemEffect::Lightning {
                    damage: 20,
                    max_range: 5,
                },
            ),
        };
        Entity::new(name, position, glyph, color, false, RenderOrder::Item).with_item(Item::with_effect(effect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_templates() {
        let potion = ItemKind::HealingPotion.spawn(Position::new(1, 2));
        assert!(!potion.blocks_movement);
        assert_eq!(potion.render_order, RenderOrder::Item);
        assert_eq!(potion.item().and_then(|item| item.effect), Some(ItemEffect::Heal { amount: 4 }));
        assert!(potion.fighter().is_none());

        let scroll = ItemKind::LightningScroll.spawn(Position::new(1, 2));
        assert!(matches!(
            scroll.item().and_then(|item| item.effect),
            Some(ItemEffect::Lightning { .. })
        ));
    }
}
