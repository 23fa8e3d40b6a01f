//! Effect definitions.
//!
//! Effects are the atomic things a card ability can do. An `Ability`
//! pairs one effect with the trigger that fires it and the target it
//! applies to; card templates carry a list of abilities.

use serde::{Deserialize, Serialize};

use crate::cards::Keyword;

/// When an ability fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTrigger {
    /// The card was played from hand (summoned unit or cast spell).
    OnPlay,
    /// The unit died. Resolved after the death sweep, never inline.
    OnDeath,
}

/// Who an effect applies to, relative to the ability's controller.
///
/// Nexus-level effects (`DamageNexus`, `HealNexus`, `DrawCards`,
/// `GainSpellMana`) resolve unit targets to the player who controls those
/// units. Unit-level effects resolve `Controller`/`Opponent` to every unit
/// that player has in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    Controller,
    Opponent,
    /// The unit carrying the ability. Empty for spells and dead units.
    ThisUnit,
    AlliedUnits,
    EnemyUnits,
    /// Enemy unit in play with the highest attack (lowest entity on ties).
    StrongestEnemy,
}

impl EffectTarget {
    /// Whether this target resolves on the controller's side.
    #[must_use]
    pub const fn is_friendly(self) -> bool {
        matches!(
            self,
            EffectTarget::Controller | EffectTarget::ThisUnit | EffectTarget::AlliedUnits
        )
    }
}

/// An atomic game effect.
///
/// ## Nexus Effects
///
/// - `DamageNexus` / `HealNexus`: change nexus health (healing is capped at
///   the starting health)
/// - `DrawCards`: draw with normal hand-overflow burning
/// - `GainSpellMana`: bank spell mana up to the cap
///
/// ## Unit Effects
///
/// - `DamageUnit`, `Buff`, `Stun`, `GrantKeyword`
///
/// ## Board Effects
///
/// - `LockPositions`: no repositioning for the rest of this round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    DamageNexus(i32),
    HealNexus(i32),
    DrawCards(usize),
    GainSpellMana(u32),

    DamageUnit(i32),
    Buff { attack: i32, health: i32 },
    Stun,
    GrantKeyword(Keyword),

    LockPositions,
}

impl Effect {
    /// Whether the effect acts on units rather than on a player.
    #[must_use]
    pub const fn targets_units(&self) -> bool {
        matches!(
            self,
            Effect::DamageUnit(_) | Effect::Buff { .. } | Effect::Stun | Effect::GrantKeyword(_)
        )
    }
}

/// A triggered effect on a card template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub trigger: AbilityTrigger,
    pub effect: Effect,
    pub target: EffectTarget,
}

impl Ability {
    #[must_use]
    pub fn new(trigger: AbilityTrigger, effect: Effect, target: EffectTarget) -> Self {
        Self {
            trigger,
            effect,
            target,
        }
    }

    #[must_use]
    pub fn on_play(effect: Effect, target: EffectTarget) -> Self {
        Self::new(AbilityTrigger::OnPlay, effect, target)
    }

    #[must_use]
    pub fn on_death(effect: Effect, target: EffectTarget) -> Self {
        Self::new(AbilityTrigger::OnDeath, effect, target)
    }
}
