//! # Combat Resolution
//!
//! Melee between two fighters. The resolver only ever touches the defender's
//! hit points; deaths are reported as [`ResultEvent::Dead`] for the turn
//! engine to interpret.

use crate::game::{Color, EntityId, EntityStore, ResultEvent};
use crate::{DelveError, DelveResult};

/// Stateless melee resolver.
pub struct CombatResolver;

impl CombatResolver {
    /// Resolves one melee attack.
    ///
    /// Damage is `max(0, attacker.power - defender.defense)`. Emits the attack
    /// message, then a `Dead` event when the defender's hit points reach zero.
    ///
    /// # Errors
    ///
    /// [`DelveError::AttackWithoutFighter`] when either side lacks a fighter
    /// component; nothing is mutated in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Color, CombatResolver, Entity, EntityStore, Fighter, Position, RenderOrder, ResultEvent};
    ///
    /// let mut store = EntityStore::new();
    /// let hero = store.spawn(
    ///     Entity::new("Hero", Position::new(1, 1), '@', Color::WHITE, true, RenderOrder::Actor)
    ///         .with_fighter(Fighter::new(30, 2, 5)),
    /// );
    /// let rat = store.spawn(
    ///     Entity::new("Rat", Position::new(2, 1), 'r', Color::WHITE, true, RenderOrder::Actor)
    ///         .with_fighter(Fighter::new(3, 0, 1)),
    /// );
    ///
    /// let events = CombatResolver::attack(&mut store, hero, rat).unwrap();
    /// assert_eq!(events.last(), Some(&ResultEvent::Dead(rat)));
    /// ```
    pub fn attack(
        store: &mut EntityStore,
        attacker: EntityId,
        defender: EntityId,
    ) -> DelveResult<Vec<ResultEvent>> {
        let attacker_entity = store.entity(attacker)?;
        let attacker_fighter = *attacker_entity
            .fighter()
            .ok_or(DelveError::AttackWithoutFighter(attacker))?;
        let attacker_name = attacker_entity.name.clone();

        let defender_entity = store.entity(defender)?;
        let defender_fighter = defender_entity
            .fighter()
            .ok_or(DelveError::AttackWithoutFighter(defender))?;
        let damage = attacker_fighter.damage_against(defender_fighter);
        let defender_name = defender_entity.name.clone();

        let mut events = Vec::new();
        if damage > 0 {
            events.push(ResultEvent::message(
                format!("{} attacks {} for {} hit points.", capitalize(&attacker_name), defender_name, damage),
                Color::WHITE,
            ));
        } else {
            events.push(ResultEvent::message(
                format!("{} attacks {} but does no damage.", capitalize(&attacker_name), defender_name),
                Color::WHITE,
            ));
        }

        events.extend(Self::apply_damage(store, defender, damage)?);
        log::debug!("{attacker} hit {defender} for {damage}");
        Ok(events)
    }

    /// Subtracts `amount` hit points from `target` and reports its death.
    ///
    /// Targets without a fighter take no damage and produce no events.
    pub fn apply_damage(
        store: &mut EntityStore,
        target: EntityId,
        amount: i32,
    ) -> DelveResult<Vec<ResultEvent>> {
        let entity = store.entity_mut(target)?;
        let Some(fighter) = entity.fighter_mut() else {
            return Ok(Vec::new());
        };

        if fighter.take_damage(amount) {
            Ok(vec![ResultEvent::Dead(target)])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Upper-cases the first character of a name for sentence starts.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Entity, Fighter, Position, RenderOrder};

    fn fighter_entity(name: &str, fighter: Fighter) -> Entity {
        Entity::new(name, Position::new(0, 0), 'x', Color::WHITE, true, RenderOrder::Actor)
            .with_fighter(fighter)
    }

    fn message_texts(events: &[ResultEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                ResultEvent::Message(message) => Some(message.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_damage_is_power_minus_defense() {
        let mut store = EntityStore::new();
        let attacker = store.spawn(fighter_entity("Player", Fighter::new(30, 0, 5)));
        let defender = store.spawn(fighter_entity("Orc", Fighter::new(10, 2, 3)));

        let events = CombatResolver::attack(&mut store, attacker, defender).unwrap();

        assert_eq!(message_texts(&events), vec!["Player attacks Orc for 3 hit points."]);
        assert_eq!(store.get(defender).unwrap().fighter().unwrap().hp, 7);
    }

    #[test]
    fn test_fourth_hit_kills() {
        let mut store = EntityStore::new();
        let attacker = store.spawn(fighter_entity("Player", Fighter::new(30, 0, 5)));
        let defender = store.spawn(fighter_entity("Orc", Fighter::new(10, 2, 3)));

        for round in 1..=3 {
            let events = CombatResolver::attack(&mut store, attacker, defender).unwrap();
            assert!(
                !events.contains(&ResultEvent::Dead(defender)),
                "round {round} should not kill"
            );
        }

        let events = CombatResolver::attack(&mut store, attacker, defender).unwrap();
        assert_eq!(events.last(), Some(&ResultEvent::Dead(defender)));
        assert_eq!(store.get(defender).unwrap().fighter().unwrap().hp, 0);
    }

    #[test]
    fn test_zero_damage_still_messages() {
        let mut store = EntityStore::new();
        let attacker = store.spawn(fighter_entity("rat", Fighter::new(2, 0, 1)));
        let defender = store.spawn(fighter_entity("Troll", Fighter::new(16, 4, 4)));

        let events = CombatResolver::attack(&mut store, attacker, defender).unwrap();

        assert_eq!(message_texts(&events), vec!["Rat attacks Troll but does no damage."]);
        assert_eq!(events.len(), 1);
        assert_eq!(store.get(defender).unwrap().fighter().unwrap().hp, 16);
    }

    #[test]
    fn test_defender_without_fighter_is_rejected() {
        let mut store = EntityStore::new();
        let attacker = store.spawn(fighter_entity("Player", Fighter::new(30, 0, 5)));
        let statue = store.spawn(Entity::new(
            "Statue",
            Position::new(1, 0),
            '&',
            Color::WHITE,
            true,
            RenderOrder::Actor,
        ));

        let result = CombatResolver::attack(&mut store, attacker, statue);
        assert!(matches!(result, Err(DelveError::AttackWithoutFighter(id)) if id == statue));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("orc"), "Orc");
        assert_eq!(capitalize(""), "");
    }
}
