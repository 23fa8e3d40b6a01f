//! Synergy bonuses applied at combat.
//!
//! A `SynergyService` looks at one player's board and returns a flat stat
//! modifier for that player's combatants. It is computed once per player
//! against the pre-combat board and must not touch the state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// Flat stat bonus added to each of a player's combatants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatModifier {
    /// Added to attack.
    pub attack: i32,
    /// Damage buffer: absorbed before the unit's own health.
    pub health: i32,
}

impl StatModifier {
    pub const NONE: StatModifier = StatModifier { attack: 0, health: 0 };

    #[must_use]
    pub const fn new(attack: i32, health: i32) -> Self {
        Self { attack, health }
    }
}

/// Computes combat bonuses for a player.
pub trait SynergyService {
    fn compute_bonuses(&self, state: &GameState, player: PlayerId) -> StatModifier;
}

/// No bonuses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSynergy;

impl SynergyService for NoSynergy {
    fn compute_bonuses(&self, _state: &GameState, _player: PlayerId) -> StatModifier {
        StatModifier::NONE
    }
}

/// Element and zodiac set bonuses.
///
/// Every element with at least `element_threshold` of the player's units in
/// play grants `attack_per_set`; every zodiac class with at least
/// `zodiac_threshold` units grants `health_per_set`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementalSynergy {
    pub element_threshold: usize,
    pub attack_per_set: i32,
    pub zodiac_threshold: usize,
    pub health_per_set: i32,
}

impl Default for ElementalSynergy {
    fn default() -> Self {
        Self {
            element_threshold: 3,
            attack_per_set: 1,
            zodiac_threshold: 2,
            health_per_set: 1,
        }
    }
}

impl ElementalSynergy {
    #[must_use]
    pub fn with_element_threshold(mut self, threshold: usize) -> Self {
        self.element_threshold = threshold.max(1);
        self
    }

    #[must_use]
    pub fn with_zodiac_threshold(mut self, threshold: usize) -> Self {
        self.zodiac_threshold = threshold.max(1);
        self
    }
}

impl SynergyService for ElementalSynergy {
    fn compute_bonuses(&self, state: &GameState, player: PlayerId) -> StatModifier {
        let mut elements = FxHashMap::default();
        let mut zodiacs = FxHashMap::default();

        for unit in state.units_in_play(player) {
            if let Some(card) = state.get_card(unit) {
                *elements.entry(card.element).or_insert(0usize) += 1;
                *zodiacs.entry(card.zodiac_class).or_insert(0usize) += 1;
            }
        }

        let element_sets = elements
            .values()
            .filter(|&&n| n >= self.element_threshold)
            .count() as i32;
        let zodiac_sets = zodiacs
            .values()
            .filter(|&&n| n >= self.zodiac_threshold)
            .count() as i32;

        StatModifier::new(
            element_sets * self.attack_per_set,
            zodiac_sets * self.health_per_set,
        )
    }
}
