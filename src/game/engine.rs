//! # Turn Engine
//!
//! The state machine that turns player intents into world changes.
//!
//! One call to [`TurnEngine::handle_intent`] resolves a whole cycle: the
//! player's action, the sweep of the result events it produced, and, when the
//! player's turn was spent, the complete enemy phase. Resolvers only report
//! what happened; every change to world membership, death handling and state
//! transitions happens here, after the resolver call that produced it has
//! returned.

use crate::game::{
    AiController, Color, CombatResolver, Direction, Entity, EntityId, EntityStore, Fighter, GameConfig,
    GameMap, GameState, Intent, InventoryManager, Message, MessageLog, ResultEvent, StateSlot,
    TurnOutcome, VisibilityField,
};
use crate::game::combat::capitalize;
use crate::generation::{Generator, RoomCorridorGenerator};
use crate::utils::RandomSource;
use crate::{DelveError, DelveResult};

/// Owns the whole simulation state of a running game.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    config: GameConfig,
    map: GameMap,
    entities: EntityStore,
    log: MessageLog,
    slot: StateSlot,
}

impl TurnEngine {
    /// Generates a level from `config` and places the player at its start.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameConfig, GameState, TurnEngine};
    ///
    /// let engine = TurnEngine::new(GameConfig::for_testing(42)).unwrap();
    /// assert_eq!(engine.state(), GameState::PlayersTurn);
    /// assert_eq!(engine.player_hp().unwrap(), (30, 30));
    /// ```
    pub fn new(config: GameConfig) -> DelveResult<Self> {
        config.validate()?;

        let mut rng = RandomSource::new(config.generation.seed);
        let level = RoomCorridorGenerator::new().generate(&config.generation, &mut rng)?;
        let stats = config.player;
        let player = Entity::player(
            level.player_start,
            Fighter::new(stats.hp, stats.defense, stats.power),
            config.inventory_capacity,
        );

        Self::from_parts(level.map, player, level.entities, config)
    }

    /// Builds an engine around a prepared map. The player is stored first,
    /// followed by `entities` in order.
    pub fn from_parts(
        map: GameMap,
        player: Entity,
        entities: Vec<Entity>,
        config: GameConfig,
    ) -> DelveResult<Self> {
        let mut store = EntityStore::new();
        store.spawn_player(player)?;
        for entity in entities {
            store.spawn(entity);
        }

        let log = MessageLog::with_capacity(config.message_log_capacity);
        let mut engine = Self {
            config,
            map,
            entities: store,
            log,
            slot: StateSlot::default(),
        };
        engine.recompute_fov()?;

        log::info!(
            "turn engine ready: {}x{} map, {} entities",
            engine.map.width(),
            engine.map.height(),
            engine.entities.len()
        );
        Ok(engine)
    }

    /// Resolves one intent, including the enemy phase it may trigger.
    ///
    /// Intent fields are handled in order: movement or pickup, opening
    /// menus, inventory selection, exit, fullscreen.
    pub fn handle_intent(&mut self, intent: &Intent) -> DelveResult<TurnOutcome> {
        let mut outcome = TurnOutcome::default();
        let mut events = Vec::new();
        let player_id = self.entities.player_id()?;

        if self.slot.current() == GameState::PlayersTurn {
            if let Some(direction) = intent.movement {
                events.extend(self.player_move(player_id, direction, &mut outcome)?);
            } else if intent.pickup {
                events.extend(self.player_pickup(player_id)?);
            }
        }

        if intent.show_inventory {
            self.slot.open_menu(GameState::ShowInventory);
        }
        if intent.drop_inventory {
            self.slot.open_menu(GameState::DropInventory);
        }

        if let Some(index) = intent.inventory_index {
            events.extend(self.select_inventory_slot(player_id, index)?);
        }

        if intent.exit {
            if self.slot.current().is_menu() {
                self.slot.cancel();
            } else {
                outcome.quit = true;
            }
        }

        outcome.toggle_fullscreen = intent.fullscreen;

        self.sweep(events)?;

        if self.slot.current() == GameState::EnemyTurn {
            self.run_enemy_phase()?;
            outcome.player_turn_consumed = true;
        }

        Ok(outcome)
    }

    fn player_move(
        &mut self,
        player_id: EntityId,
        direction: Direction,
        outcome: &mut TurnOutcome,
    ) -> DelveResult<Vec<ResultEvent>> {
        let destination = self.entities.entity(player_id)?.position + direction.to_delta();
        if self.map.is_blocked(destination) {
            log::debug!("bumped into a wall at ({}, {})", destination.x, destination.y);
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        match self.entities.blocking_entity_at(destination) {
            Some(target) => match CombatResolver::attack(&mut self.entities, player_id, target) {
                Ok(attack_events) => events.extend(attack_events),
                Err(DelveError::AttackWithoutFighter(id)) => {
                    log::warn!("attack rejected: {id} has no fighter");
                    return Ok(events);
                }
                Err(err) => return Err(err),
            },
            None => {
                self.entities.entity_mut(player_id)?.position = destination;
                self.recompute_fov()?;
                outcome.fov_recomputed = true;
            }
        }

        self.slot.set(GameState::EnemyTurn);
        Ok(events)
    }

    fn player_pickup(&mut self, player_id: EntityId) -> DelveResult<Vec<ResultEvent>> {
        let position = self.entities.entity(player_id)?.position;
        let item = self
            .entities
            .iter_world()
            .find(|(id, entity)| *id != player_id && entity.item().is_some() && entity.position == position)
            .map(|(id, _)| id);

        match item {
            Some(item) => InventoryManager::add_item(&mut self.entities, player_id, item),
            None => Ok(vec![ResultEvent::message(
                "There is nothing here to pick up.",
                Color::YELLOW,
            )]),
        }
    }

    /// Uses or drops the item in slot `index`, depending on the open menu.
    /// Anything else is an invalid selection and is ignored.
    fn select_inventory_slot(&mut self, player_id: EntityId, index: usize) -> DelveResult<Vec<ResultEvent>> {
        let StateSlot::ActiveWithReturn { state, return_to } = self.slot else {
            log::debug!("ignoring inventory slot {index}: no menu open");
            return Ok(Vec::new());
        };
        if return_to == GameState::PlayerDead {
            log::debug!("ignoring inventory slot {index}: player is dead");
            return Ok(Vec::new());
        }

        let item = self
            .entities
            .entity(player_id)?
            .inventory()
            .and_then(|inventory| inventory.get(index));
        let Some(item) = item else {
            log::debug!("ignoring inventory slot {index}: out of range");
            return Ok(Vec::new());
        };

        match state {
            GameState::ShowInventory => InventoryManager::use_item(&mut self.entities, &self.map.grid, player_id, item),
            GameState::DropInventory => InventoryManager::drop_item(&mut self.entities, player_id, item),
            _ => Ok(Vec::new()),
        }
    }

    /// Applies result events in order.
    fn sweep(&mut self, events: Vec<ResultEvent>) -> DelveResult<()> {
        for event in events {
            let ends_turn = event.ends_player_turn();
            match event {
                ResultEvent::Message(message) => self.log.add_message(message),
                ResultEvent::Dead(id) if self.entities.is_player(id) => self.kill_player(id)?,
                ResultEvent::Dead(id) => self.kill_monster(id)?,
                ResultEvent::ItemAdded(item) => {
                    self.entities.remove_from_world(item);
                }
                ResultEvent::ItemConsumed(item) => {
                    let player_id = self.entities.player_id()?;
                    InventoryManager::remove_consumed(&mut self.entities, player_id, item)?;
                }
                ResultEvent::ItemDropped(item) => self.entities.return_to_world(item)?,
            }
            if ends_turn {
                self.end_player_turn();
            }
        }
        Ok(())
    }

    fn end_player_turn(&mut self) {
        if self.slot.current() != GameState::PlayerDead {
            self.slot.set(GameState::EnemyTurn);
        }
    }

    fn kill_player(&mut self, player_id: EntityId) -> DelveResult<()> {
        let player = self.entities.entity_mut(player_id)?;
        player.glyph = '%';
        player.color = Color::DARK_RED;

        log::info!("player died");
        self.log.add_message(Message::new("You died!", Color::RED));
        self.slot.set(GameState::PlayerDead);
        Ok(())
    }

    fn kill_monster(&mut self, id: EntityId) -> DelveResult<()> {
        let monster = self.entities.entity_mut(id)?;
        let text = format!("{} is dead!", capitalize(&monster.name));
        monster.convert_to_corpse();

        log::debug!("{id} became a corpse");
        self.log.add_message(Message::new(text, Color::ORANGE));
        Ok(())
    }

    /// Every AI entity acts once, in world order. The phase stops as soon as
    /// the player dies.
    fn run_enemy_phase(&mut self) -> DelveResult<()> {
        for actor in self.entities.ai_entity_ids() {
            let events = match AiController::take_turn(&mut self.entities, &self.map, actor) {
                Ok(events) => events,
                Err(DelveError::AttackWithoutFighter(id)) => {
                    log::warn!("{actor} skipped its attack: {id} has no fighter");
                    continue;
                }
                Err(err) => return Err(err),
            };
            self.sweep(events)?;
            if self.slot.current() == GameState::PlayerDead {
                log::debug!("enemy phase cut short by player death");
                return Ok(());
            }
        }
        self.slot.set(GameState::PlayersTurn);
        Ok(())
    }

    fn recompute_fov(&mut self) -> DelveResult<()> {
        let origin = self.entities.player()?.position;
        VisibilityField::recompute(&mut self.map.grid, origin, &self.config.fov);
        Ok(())
    }

    pub fn state(&self) -> GameState {
        self.slot.current()
    }

    pub fn state_slot(&self) -> StateSlot {
        self.slot
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.log
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> DelveResult<&Entity> {
        self.entities.player()
    }

    /// Current and maximum hit points of the player, for the HUD.
    pub fn player_hp(&self) -> DelveResult<(i32, i32)> {
        let player = self.entities.player()?;
        let fighter = player
            .fighter()
            .ok_or_else(|| DelveError::InvalidState("player has no fighter".to_string()))?;
        Ok((fighter.hp, fighter.max_hp))
    }
}
