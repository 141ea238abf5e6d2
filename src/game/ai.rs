//! # Monster AI
//!
//! Per-entity behaviours invoked once per AI-bearing entity during the enemy
//! phase.

use crate::game::{CombatResolver, EntityId, EntityStore, GameMap, ResultEvent};
use crate::utils::step_towards;
use crate::DelveResult;
use serde::{Deserialize, Serialize};

/// Behaviour tag stored in an entity's AI component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Close in on the player while standing in the player's view, attack when adjacent
    Chase,
}

/// Dispatches an entity's behaviour.
pub struct AiController;

impl AiController {
    /// Runs one turn for `actor`.
    ///
    /// Dead entities, entities without an AI component and entities on tiles
    /// outside the player's current view do nothing.
    pub fn take_turn(
        store: &mut EntityStore,
        map: &GameMap,
        actor: EntityId,
    ) -> DelveResult<Vec<ResultEvent>> {
        let entity = store.entity(actor)?;
        if !entity.is_alive() {
            return Ok(Vec::new());
        }
        match entity.ai() {
            Some(AiBehavior::Chase) => Self::chase(store, map, actor),
            None => Ok(Vec::new()),
        }
    }

    fn chase(store: &mut EntityStore, map: &GameMap, actor: EntityId) -> DelveResult<Vec<ResultEvent>> {
        let position = store.entity(actor)?.position;
        if !map.grid.is_visible(position) {
            return Ok(Vec::new());
        }

        let player_id = store.player_id()?;
        let player = store.entity(player_id)?;
        let target = player.position;

        if position.is_adjacent(target) {
            if player.is_alive() {
                return CombatResolver::attack(store, actor, player_id);
            }
            return Ok(Vec::new());
        }

        let step = step_towards(position, target, |pos| {
            map.is_blocked(pos) || store.blocking_entity_at(pos).is_some()
        });
        if let Some(next) = step {
            store.entity_mut(actor)?.position = next;
        }
        Ok(Vec::new())
    }
}
