//! Card instances - runtime card state.
//!
//! `CardInstance` is one copy of a card in one game. It carries the stats
//! the rules mutate (current health, buffs, statuses, exhaustion) and its
//! lane position while it is a combatant. Which zone it is in is tracked by
//! the `ZoneManager`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::attributes::{CardType, Element, Keyword, Keywords, StatusEffect, ZodiacClass};
use super::definition::{CardDefinition, CardId};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// A card instance in a game.
///
/// ## Counters
///
/// `counters` is free-form integer state for abilities (`FxHashMap<String,
/// i64>`, matching the rest of the engine's integer-only state). Booleans
/// are stored as 0/1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub entity_id: EntityId,
    pub card_id: CardId,
    pub owner: PlayerId,
    pub card_type: CardType,
    pub element: Element,
    pub zodiac_class: ZodiacClass,

    /// Mana cost, copied from the template.
    pub cost: u32,

    /// Current attack including permanent buffs.
    pub attack: i32,

    /// Health the unit heals up to.
    pub max_health: i32,

    pub current_health: i32,

    /// Template keywords plus any granted in play.
    pub keywords: Keywords,

    pub status_effects: Vec<StatusEffect>,

    #[serde(default)]
    pub counters: FxHashMap<String, i64>,

    /// Lane index while placed in a lane.
    pub position: Option<u8>,

    /// Set when the unit attacks; cleared at upkeep.
    pub exhausted: bool,
}

impl CardInstance {
    /// Instantiate a template for an owner.
    #[must_use]
    pub fn from_definition(entity_id: EntityId, definition: &CardDefinition, owner: PlayerId) -> Self {
        Self {
            entity_id,
            card_id: definition.id,
            owner,
            card_type: definition.card_type,
            element: definition.element,
            zodiac_class: definition.zodiac_class,
            cost: definition.cost,
            attack: definition.attack,
            max_health: definition.health,
            current_health: definition.health,
            keywords: definition.keywords.clone(),
            status_effects: Vec::new(),
            counters: FxHashMap::default(),
            position: None,
            exhausted: false,
        }
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.card_type == CardType::Unit
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    pub fn grant_keyword(&mut self, keyword: Keyword) {
        if !self.has_keyword(keyword) {
            self.keywords.push(keyword);
        }
    }

    // === Statuses ===

    #[must_use]
    pub fn has_status(&self, status: StatusEffect) -> bool {
        self.status_effects.contains(&status)
    }

    pub fn add_status(&mut self, status: StatusEffect) {
        if !self.has_status(status) {
            self.status_effects.push(status);
        }
    }

    pub fn remove_status(&mut self, status: StatusEffect) {
        self.status_effects.retain(|&s| s != status);
    }

    /// Drop `Attacking`/`Blocking` once combat has resolved.
    pub fn clear_combat_statuses(&mut self) {
        self.status_effects.retain(|s| !s.is_combat_scoped());
    }

    // === Combat eligibility ===

    /// A bench unit that may be declared as an attacker.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.is_unit() && !self.exhausted && !self.has_status(StatusEffect::Stunned)
    }

    /// A bench unit that may be assigned as a defender.
    #[must_use]
    pub fn can_block(&self) -> bool {
        self.is_unit()
            && !self.has_status(StatusEffect::Stunned)
            && !self.has_keyword(Keyword::CantBlock)
    }

    /// Whether this unit may block `attacker` (`Elusive` needs `Elusive`).
    #[must_use]
    pub fn can_block_attacker(&self, attacker: &CardInstance) -> bool {
        self.can_block()
            && (!attacker.has_keyword(Keyword::Elusive) || self.has_keyword(Keyword::Elusive))
    }

    // === Stats ===

    /// Apply damage. Negative amounts are treated as zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.current_health -= amount.max(0);
    }

    /// Restore health up to `max_health`.
    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health);
    }

    /// Permanent stat change. Health buffs raise both max and current health.
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack = (self.attack + attack).max(0);
        self.max_health += health;
        self.current_health += health;
    }

    // === Counters ===

    #[must_use]
    pub fn counter(&self, key: &str, default: i64) -> i64 {
        self.counters.get(key).copied().unwrap_or(default)
    }

    pub fn set_counter(&mut self, key: impl Into<String>, value: i64) {
        self.counters.insert(key.into(), value);
    }

    pub fn modify_counter(&mut self, key: &str, delta: i64) {
        let current = self.counter(key, 0);
        self.counters.insert(key.to_string(), current + delta);
    }
}
