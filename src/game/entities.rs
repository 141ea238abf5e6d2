//! # Entities and Components
//!
//! Every actor and item is an [`Entity`] record carrying an optional set of
//! components. The [`EntityStore`] owns all records; the world list and
//! inventories only hold [`EntityId`]s into it, so moving an item between the
//! floor and a backpack never creates or destroys a record.

use crate::game::{AiBehavior, EntityId, Position};
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// RGB colour handed to the presenter. The core attaches no meaning to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const DARK_RED: Color = Color::new(191, 0, 0);
    pub const ORANGE: Color = Color::new(255, 127, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const LIGHT_CYAN: Color = Color::new(115, 255, 255);
    pub const VIOLET: Color = Color::new(127, 0, 255);
    pub const DESATURATED_GREEN: Color = Color::new(63, 127, 63);
    pub const DARKER_GREEN: Color = Color::new(0, 127, 0);
}

/// Draw and iteration priority tier. Later variants draw on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// Combat statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub hp: i32,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    /// Creates a fighter at full health.
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self {
            hp,
            max_hp: hp,
            defense,
            power,
        }
    }

    /// Damage this fighter deals to `defender` per hit, never negative.
    pub fn damage_against(&self, defender: &Fighter) -> i32 {
        (self.power - defender.defense).max(0)
    }

    /// Subtracts `amount` hit points, clamped at zero. Returns true when the
    /// fighter is left with no hit points.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount.max(0)).max(0);
        self.hp <= 0
    }

    /// Restores up to `amount` hit points without exceeding `max_hp`.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_at_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }
}

/// Ordered backpack of item ids with a fixed number of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<EntityId>,
    pub capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item in slot `index`, if the slot is filled.
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.items.get(index).copied()
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Removes `item`, keeping the order of the rest. Returns false when absent.
    pub fn remove(&mut self, item: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|&id| id != item);
        self.items.len() != before
    }
}

/// What happens when an item is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restores hit points to the user
    Heal { amount: i32 },
    /// Strikes the closest visible fighter within range
    Lightning { damage: i32, max_range: i32 },
}

/// Marks an entity as something that can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub effect: Option<ItemEffect>,
}

impl Item {
    pub fn with_effect(effect: ItemEffect) -> Self {
        Self {
            effect: Some(effect),
        }
    }
}

/// Optional capabilities attached to an entity, queried by presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    pub fighter: Option<Fighter>,
    pub inventory: Option<Inventory>,
    pub ai: Option<AiBehavior>,
    pub item: Option<Item>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.fighter.is_none() && self.inventory.is_none() && self.ai.is_none() && self.item.is_none()
    }
}

/// An actor or item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub color: Color,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub components: Components,
}

impl Entity {
    /// Creates an entity with no components.
    pub fn new(
        name: impl Into<String>,
        position: Position,
        glyph: char,
        color: Color,
        blocks_movement: bool,
        render_order: RenderOrder,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            glyph,
            color,
            blocks_movement,
            render_order,
            components: Components::default(),
        }
    }

    /// Builds the player character.
    pub fn player(position: Position, fighter: Fighter, inventory_capacity: usize) -> Self {
        Self::new("Player", position, '@', Color::WHITE, true, RenderOrder::Actor)
            .with_fighter(fighter)
            .with_inventory(Inventory::new(inventory_capacity))
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.components.fighter = Some(fighter);
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.components.inventory = Some(inventory);
        self
    }

    pub fn with_ai(mut self, ai: AiBehavior) -> Self {
        self.components.ai = Some(ai);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.components.item = Some(item);
        self
    }

    pub fn fighter(&self) -> Option<&Fighter> {
        self.components.fighter.as_ref()
    }

    pub fn fighter_mut(&mut self) -> Option<&mut Fighter> {
        self.components.fighter.as_mut()
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.components.inventory.as_ref()
    }

    pub fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        self.components.inventory.as_mut()
    }

    pub fn ai(&self) -> Option<AiBehavior> {
        self.components.ai
    }

    pub fn item(&self) -> Option<&Item> {
        self.components.item.as_ref()
    }

    /// Entities without a fighter are never "dead"; fighters are alive while hp > 0.
    pub fn is_alive(&self) -> bool {
        self.fighter().map_or(true, Fighter::is_alive)
    }

    /// Converts a dead monster into an inert, non-blocking remnant.
    pub fn convert_to_corpse(&mut self) {
        self.glyph = '%';
        self.color = Color::DARK_RED;
        self.blocks_movement = false;
        self.render_order = RenderOrder::Corpse;
        self.components = Components::default();
        self.name = format!("remains of {}", self.name);
    }
}

/// Owner of every entity record.
///
/// Records live in an append-only arena indexed by [`EntityId`]. The world
/// list holds the ids currently on the map, in spawn order; that order is the
/// deterministic iteration order of the enemy phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    records: Vec<Entity>,
    world: Vec<EntityId>,
    player: Option<EntityId>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entity` and places it in the world. Returns its new id.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.records.len());
        self.records.push(entity);
        self.world.push(id);
        id
    }

    /// Stores the player entity. Only one player may exist.
    pub fn spawn_player(&mut self, entity: Entity) -> DelveResult<EntityId> {
        if self.player.is_some() {
            return Err(DelveError::InvalidState(
                "a player entity already exists".to_string(),
            ));
        }
        let id = self.spawn(entity);
        self.player = Some(id);
        Ok(id)
    }

    pub fn player_id(&self) -> DelveResult<EntityId> {
        self.player
            .ok_or_else(|| DelveError::InvalidState("no player entity".to_string()))
    }

    pub fn is_player(&self, id: EntityId) -> bool {
        self.player == Some(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.records.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.records.get_mut(id.0)
    }

    /// Like [`get`](Self::get) but reports a missing record as an error.
    pub fn entity(&self, id: EntityId) -> DelveResult<&Entity> {
        self.get(id).ok_or(DelveError::UnknownEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> DelveResult<&mut Entity> {
        self.get_mut(id).ok_or(DelveError::UnknownEntity(id))
    }

    pub fn player(&self) -> DelveResult<&Entity> {
        self.entity(self.player_id()?)
    }

    /// Ids of the entities on the map, in spawn order.
    pub fn world_ids(&self) -> &[EntityId] {
        &self.world
    }

    pub fn in_world(&self, id: EntityId) -> bool {
        self.world.contains(&id)
    }

    /// Iterates over the entities on the map, in spawn order.
    pub fn iter_world(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.world
            .iter()
            .filter_map(move |&id| self.get(id).map(|entity| (id, entity)))
    }

    /// Takes an entity off the map (e.g. into an inventory). The record survives.
    pub fn remove_from_world(&mut self, id: EntityId) -> bool {
        let before = self.world.len();
        self.world.retain(|&other| other != id);
        self.world.len() != before
    }

    /// Puts an entity back on the map at the end of the world list.
    pub fn return_to_world(&mut self, id: EntityId) -> DelveResult<()> {
        self.entity(id)?;
        if !self.in_world(id) {
            self.world.push(id);
        }
        Ok(())
    }

    /// First blocking entity standing on `pos`.
    pub fn blocking_entity_at(&self, pos: Position) -> Option<EntityId> {
        self.iter_world()
            .find(|(_, entity)| entity.blocks_movement && entity.position == pos)
            .map(|(id, _)| id)
    }

    /// All entities on the map standing on `pos`, in world order.
    pub fn entities_at(&self, pos: Position) -> Vec<EntityId> {
        self.iter_world()
            .filter(|(_, entity)| entity.position == pos)
            .map(|(id, _)| id)
            .collect()
    }

    /// Ids of AI-controlled entities on the map, in world order.
    pub fn ai_entity_ids(&self) -> Vec<EntityId> {
        self.iter_world()
            .filter(|(_, entity)| entity.ai().is_some())
            .map(|(id, _)| id)
            .collect()
    }

    /// World entities sorted for drawing: corpses first, actors last.
    /// Ties keep world order.
    pub fn render_list(&self) -> Vec<(EntityId, &Entity)> {
        let mut list: Vec<_> = self.iter_world().collect();
        list.sort_by_key(|(_, entity)| entity.render_order);
        list
    }

    /// Total number of records ever stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
