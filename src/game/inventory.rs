//! # Inventory Management
//!
//! Pickup, use and drop. Each operation edits only the owner's inventory
//! list (and, for heals and lightning, hit points); world-list membership
//! changes are left to the turn engine via the emitted events.

use crate::game::{Color, CombatResolver, EntityId, EntityStore, ItemEffect, ResultEvent, TileGrid};
use crate::{DelveError, DelveResult};

/// Stateless inventory resolver.
pub struct InventoryManager;

impl InventoryManager {
    /// Puts `item` into `owner`'s inventory if there is room.
    ///
    /// On success emits [`ResultEvent::ItemAdded`]; the caller takes the item
    /// off the map. A full inventory only produces a message.
    pub fn add_item(
        store: &mut EntityStore,
        owner: EntityId,
        item: EntityId,
    ) -> DelveResult<Vec<ResultEvent>> {
        let item_name = store.entity(item)?.name.clone();
        let inventory = store
            .entity_mut(owner)?
            .inventory_mut()
            .ok_or_else(|| DelveError::InvalidState(format!("{owner} has no inventory")))?;

        if inventory.is_full() {
            return Ok(vec![ResultEvent::message(
                "You cannot carry any more, your inventory is full",
                Color::YELLOW,
            )]);
        }

        inventory.items.push(item);
        Ok(vec![
            ResultEvent::message(format!("You pick up the {item_name}!"), Color::BLUE),
            ResultEvent::ItemAdded(item),
        ])
    }

    /// Applies the item's effect on behalf of `owner`.
    ///
    /// Emits [`ResultEvent::ItemConsumed`] only when the effect did something;
    /// the caller then removes the item with [`remove_consumed`](Self::remove_consumed).
    /// `grid` supplies current visibility for targeted effects.
    pub fn use_item(
        store: &mut EntityStore,
        grid: &TileGrid,
        owner: EntityId,
        item: EntityId,
    ) -> DelveResult<Vec<ResultEvent>> {
        Self::ensure_owned(store, owner, item)?;

        let item_entity = store.entity(item)?;
        let Some(effect) = item_entity.item().and_then(|component| component.effect) else {
            return Ok(vec![ResultEvent::message(
                format!("The {} cannot be used", item_entity.name),
                Color::YELLOW,
            )]);
        };

        match effect {
            ItemEffect::Heal { amount } => Self::heal(store, owner, item, amount),
            ItemEffect::Lightning { damage, max_range } => {
                Self::cast_lightning(store, grid, owner, item, damage, max_range)
            }
        }
    }

    /// Takes `item` out of `owner`'s inventory and leaves it at their feet.
    ///
    /// Emits [`ResultEvent::ItemDropped`]; the caller puts the item back on the map.
    pub fn drop_item(
        store: &mut EntityStore,
        owner: EntityId,
        item: EntityId,
    ) -> DelveResult<Vec<ResultEvent>> {
        Self::ensure_owned(store, owner, item)?;

        let owner_entity = store.entity_mut(owner)?;
        let drop_position = owner_entity.position;
        if let Some(inventory) = owner_entity.inventory_mut() {
            inventory.remove(item);
        }

        let item_entity = store.entity_mut(item)?;
        item_entity.position = drop_position;

        Ok(vec![
            ResultEvent::message(format!("You dropped the {}.", item_entity.name), Color::YELLOW),
            ResultEvent::ItemDropped(item),
        ])
    }

    /// Removes a consumed item from `owner`'s inventory.
    pub fn remove_consumed(store: &mut EntityStore, owner: EntityId, item: EntityId) -> DelveResult<()> {
        if let Some(inventory) = store.entity_mut(owner)?.inventory_mut() {
            inventory.remove(item);
        }
        Ok(())
    }

    fn ensure_owned(store: &EntityStore, owner: EntityId, item: EntityId) -> DelveResult<()> {
        let owns = store
            .entity(owner)?
            .inventory()
            .map_or(false, |inventory| inventory.contains(item));
        if owns {
            Ok(())
        } else {
            Err(DelveError::InvalidState(format!("{owner} does not carry {item}")))
        }
    }

    fn heal(
        store: &mut EntityStore,
        owner: EntityId,
        item: EntityId,
        amount: i32,
    ) -> DelveResult<Vec<ResultEvent>> {
        let fighter = store
            .entity_mut(owner)?
            .fighter_mut()
            .ok_or_else(|| DelveError::InvalidState(format!("{owner} cannot be healed")))?;

        if fighter.is_at_full_health() {
            return Ok(vec![ResultEvent::message(
                "You are already at full health",
                Color::YELLOW,
            )]);
        }

        fighter.heal(amount);
        Ok(vec![
            ResultEvent::message("Your wounds start to feel better!", Color::GREEN),
            ResultEvent::ItemConsumed(item),
        ])
    }

    fn cast_lightning(
        store: &mut EntityStore,
        grid: &TileGrid,
        owner: EntityId,
        item: EntityId,
        damage: i32,
        max_range: i32,
    ) -> DelveResult<Vec<ResultEvent>> {
        let origin = store.entity(owner)?.position;

        // Closest living fighter in sight; earlier world entries win ties.
        let mut target: Option<(EntityId, i32)> = None;
        for (id, entity) in store.iter_world() {
            if id == owner || !grid.is_visible(entity.position) {
                continue;
            }
            if !entity.fighter().map_or(false, |fighter| fighter.is_alive()) {
                continue;
            }
            let distance = origin.distance_squared(entity.position);
            if distance > max_range * max_range {
                continue;
            }
            if target.map_or(true, |(_, best)| distance < best) {
                target = Some((id, distance));
            }
        }

        let Some((target, _)) = target else {
            return Ok(vec![ResultEvent::message(
                "No enemy is close enough to strike.",
                Color::RED,
            )]);
        };

        let target_name = store.entity(target)?.name.clone();
        let mut events = vec![ResultEvent::message(
            format!("A lightning bolt strikes the {target_name} with a loud thunder! The damage is {damage}"),
            Color::LIGHT_CYAN,
        )];
        events.extend(CombatResolver::apply_damage(store, target, damage)?);
        events.push(ResultEvent::ItemConsumed(item));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{AiBehavior, Entity, Fighter, Item, Position, RenderOrder};

    fn setup(capacity: usize) -> (EntityStore, EntityId) {
        let mut store = EntityStore::new();
        let player = store
            .spawn_player(Entity::player(Position::new(2, 2), Fighter::new(30, 2, 5), capacity))
            .unwrap();
        (store, player)
    }

    fn potion(store: &mut EntityStore, pos: Position) -> EntityId {
        store.spawn(
            Entity::new("Healing Potion", pos, '!', Color::VIOLET, false, RenderOrder::Item)
                .with_item(Item::with_effect(ItemEffect::Heal { amount: 4 })),
        )
    }

    fn carried(store: &mut EntityStore, owner: EntityId, item: EntityId) {
        store.entity_mut(owner).unwrap().inventory_mut().unwrap().items.push(item);
        store.remove_from_world(item);
    }

    fn lit_grid() -> TileGrid {
        let mut grid = TileGrid::new(12, 12);
        for pos in grid.positions().collect::<Vec<_>>() {
            let tile = grid.get_tile_mut(pos).unwrap();
            tile.tile_type = crate::game::TileType::Floor;
            tile.set_visible(true);
        }
        grid
    }

    #[test]
    fn test_add_item_until_full() {
        let (mut store, player) = setup(26);
        for i in 0..26 {
            let item = potion(&mut store, Position::new(2, 2));
            let events = InventoryManager::add_item(&mut store, player, item).unwrap();
            assert_eq!(events.last(), Some(&ResultEvent::ItemAdded(item)), "item {i}");
        }

        let extra = potion(&mut store, Position::new(2, 2));
        let events = InventoryManager::add_item(&mut store, player, extra).unwrap();

        assert_eq!(
            events,
            vec![ResultEvent::message(
                "You cannot carry any more, your inventory is full",
                Color::YELLOW
            )]
        );
        assert_eq!(store.get(player).unwrap().inventory().unwrap().len(), 26);
    }

    #[test]
    fn test_heal_at_full_health_is_not_consumed() {
        let (mut store, player) = setup(26);
        let item = potion(&mut store, Position::new(2, 2));
        carried(&mut store, player, item);

        let events = InventoryManager::use_item(&mut store, &lit_grid(), player, item).unwrap();

        assert_eq!(events, vec![ResultEvent::message("You are already at full health", Color::YELLOW)]);
        assert!(store.get(player).unwrap().inventory().unwrap().contains(item));
    }

    #[test]
    fn test_heal_restores_up_to_max() {
        let (mut store, player) = setup(26);
        store.entity_mut(player).unwrap().fighter_mut().unwrap().take_damage(2);
        let item = potion(&mut store, Position::new(2, 2));
        carried(&mut store, player, item);

        let events = InventoryManager::use_item(&mut store, &lit_grid(), player, item).unwrap();

        assert_eq!(events.last(), Some(&ResultEvent::ItemConsumed(item)));
        assert_eq!(store.get(player).unwrap().fighter().unwrap().hp, 30);

        InventoryManager::remove_consumed(&mut store, player, item).unwrap();
        assert!(store.get(player).unwrap().inventory().unwrap().is_empty());
    }

    #[test]
    fn test_item_without_effect() {
        let (mut store, player) = setup(26);
        let rock = store.spawn(
            Entity::new("Rock", Position::new(2, 2), '*', Color::WHITE, false, RenderOrder::Item)
                .with_item(Item { effect: None }),
        );
        carried(&mut store, player, rock);

        let events = InventoryManager::use_item(&mut store, &lit_grid(), player, rock).unwrap();
        assert_eq!(events, vec![ResultEvent::message("The Rock cannot be used", Color::YELLOW)]);
    }

    #[test]
    fn test_drop_places_item_at_owner() {
        let (mut store, player) = setup(26);
        let item = potion(&mut store, Position::new(9, 9));
        carried(&mut store, player, item);

        let events = InventoryManager::drop_item(&mut store, player, item).unwrap();

        assert_eq!(events.last(), Some(&ResultEvent::ItemDropped(item)));
        assert_eq!(store.get(item).unwrap().position, Position::new(2, 2));
        assert!(store.get(player).unwrap().inventory().unwrap().is_empty());
    }

    #[test]
    fn test_using_item_not_carried_fails() {
        let (mut store, player) = setup(26);
        let item = potion(&mut store, Position::new(2, 2));
        assert!(InventoryManager::use_item(&mut store, &lit_grid(), player, item).is_err());
        assert!(InventoryManager::drop_item(&mut store, player, item).is_err());
    }

    #[test]
    fn test_lightning_hits_closest_visible_fighter() {
        let (mut store, player) = setup(26);
        let near = store.spawn(
            Entity::new("Orc", Position::new(4, 2), 'o', Color::DESATURATED_GREEN, true, RenderOrder::Actor)
                .with_fighter(Fighter::new(10, 0, 3))
                .with_ai(AiBehavior::Chase),
        );
        let far = store.spawn(
            Entity::new("Troll", Position::new(6, 2), 'T', Color::DARKER_GREEN, true, RenderOrder::Actor)
                .with_fighter(Fighter::new(16, 1, 4))
                .with_ai(AiBehavior::Chase),
        );
        let scroll = store.spawn(
            Entity::new("Lightning Scroll", Position::new(2, 2), '#', Color::YELLOW, false, RenderOrder::Item)
                .with_item(Item::with_effect(ItemEffect::Lightning { damage: 20, max_range: 5 })),
        );
        carried(&mut store, player, scroll);

        let events = InventoryManager::use_item(&mut store, &lit_grid(), player, scroll).unwrap();

        assert!(events.contains(&ResultEvent::Dead(near)));
        assert_eq!(events.last(), Some(&ResultEvent::ItemConsumed(scroll)));
        assert_eq!(store.get(far).unwrap().fighter().unwrap().hp, 16);
    }

    #[test]
    fn test_lightning_without_target_is_kept() {
        let (mut store, player) = setup(26);
        let scroll = store.spawn(
            Entity::new("Lightning Scroll", Position::new(2, 2), '#', Color::YELLOW, false, RenderOrder::Item)
                .with_item(Item::with_effect(ItemEffect::Lightning { damage: 20, max_range: 5 })),
        );
        carried(&mut store, player, scroll);

        let events = InventoryManager::use_item(&mut store, &lit_grid(), player, scroll).unwrap();

        assert_eq!(events, vec![ResultEvent::message("No enemy is close enough to strike.", Color::RED)]);
    }
}
