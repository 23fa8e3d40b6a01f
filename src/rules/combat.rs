//! Combat resolution.
//!
//! Resolution runs in fixed steps:
//!
//! 1. Synergy bonuses are computed once per player on the pre-combat board.
//! 2. Every lane is evaluated against that snapshot. `QuickAttack` on
//!    exactly one side strikes first; a kill there cancels the strike back.
//!    Otherwise both sides strike simultaneously. Unblocked attackers hit
//!    the defending nexus.
//! 3. All lane results are applied together, then `Lifesteal` heals.
//! 4. Dead units are swept and their `OnDeath` abilities resolved.
//! 5. Lanes are cleared and survivors return to their bench.
//!
//! Damage is never negative and overkill is not carried over.

use log::debug;

use crate::cards::{CardInstance, Keyword, StatusEffect};
use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::{EffectContext, EffectResolver};
use crate::events::{DamageTarget, GameEvent};
use crate::services::{StatModifier, SynergyService};

/// What happened in one lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneOutcome {
    pub lane: usize,
    pub attacker: EntityId,
    pub defender: Option<EntityId>,
    /// Damage the attacker dealt, to the defender or to the nexus.
    pub attacker_dealt: i32,
    pub defender_dealt: i32,
    pub nexus_damage: i32,
    /// One side struck first and killed the other before it could strike.
    pub quick_strike_kill: bool,
}

/// Summary of a resolved combat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub lanes: Vec<LaneOutcome>,
    /// Total damage dealt to the defending nexus.
    pub nexus_damage: i32,
    /// Units that died, including `OnDeath` chain victims.
    pub deaths: Vec<EntityId>,
    /// Sum of the attackers' bonus-adjusted attack.
    pub attack_total: i32,
    /// Attack of attackers killed by a defender's quick strike before
    /// they could hit.
    pub cancelled_attack: i32,
}

impl CombatReport {
    /// Damage attackers dealt to units and the nexus combined. Adding
    /// `cancelled_attack` gives `attack_total`.
    #[must_use]
    pub fn attacker_damage_total(&self) -> i32 {
        self.lanes.iter().map(|l| l.attacker_dealt).sum()
    }
}

/// A unit as it enters combat, with bonuses applied.
#[derive(Clone, Copy, Debug)]
struct Combatant {
    id: EntityId,
    owner: PlayerId,
    attack: i32,
    health: i32,
    /// Synergy health, absorbed before `health`.
    buffer: i32,
    quick: bool,
    lifesteal: bool,
}

impl Combatant {
    fn new(card: &CardInstance, bonus: StatModifier) -> Self {
        Self {
            id: card.entity_id,
            owner: card.owner,
            attack: (card.attack + bonus.attack).max(0),
            health: card.current_health,
            buffer: bonus.health.max(0),
            quick: card.has_keyword(Keyword::QuickAttack),
            lifesteal: card.has_keyword(Keyword::Lifesteal),
        }
    }

    fn effective_health(&self) -> i32 {
        self.health + self.buffer
    }

    /// Health lost to `damage` once the buffer is used up.
    fn health_loss(&self, damage: i32) -> i32 {
        (damage - self.buffer).max(0)
    }
}

/// Pending effects of one lane, applied after every lane is evaluated.
struct LaneResult {
    outcome: LaneOutcome,
    hits: Vec<(Combatant, DamageTarget, i32)>,
    health_loss: Vec<(EntityId, i32)>,
    cancelled: i32,
}

/// Resolves the combat step on a working state.
pub struct CombatResolver;

impl CombatResolver {
    /// Run combat. Callers check `combat_resolved` first; this always
    /// resolves.
    pub fn resolve(
        state: &mut GameState,
        ctx: &EffectContext<'_>,
        synergy: &dyn SynergyService,
        events: &mut Vec<GameEvent>,
    ) -> CombatReport {
        let defender_player = state.defending_player();
        let attacker_player = defender_player.opponent();

        let attack_bonus = synergy.compute_bonuses(state, attacker_player);
        let defense_bonus = synergy.compute_bonuses(state, defender_player);

        let mut report = CombatReport::default();
        let mut results = Vec::new();
        for (lane, slot) in state.lanes.iter().enumerate() {
            let Some(attacker) = slot.attacker.and_then(|id| state.get_card(id)) else {
                continue;
            };
            let attacker = Combatant::new(attacker, attack_bonus);
            report.attack_total += attacker.attack;
            let defender = slot
                .defender
                .and_then(|id| state.get_card(id))
                .map(|card| Combatant::new(card, defense_bonus));

            results.push(Self::evaluate_lane(lane, attacker, defender, defender_player));
        }

        let mut heals: Vec<(PlayerId, i32)> = Vec::new();

        for result in results {
            for (source, target, amount) in &result.hits {
                events.push(GameEvent::DamageDealt {
                    source: source.id,
                    target: *target,
                    amount: *amount,
                });
                if source.lifesteal && *amount > 0 {
                    heals.push((source.owner, *amount));
                }
            }
            for &(unit, loss) in &result.health_loss {
                if let Some(card) = state.get_card_mut(unit) {
                    card.take_damage(loss);
                }
            }
            state.player_mut(defender_player).health -= result.outcome.nexus_damage;

            debug!(
                "lane {}: {} dealt {}, defender dealt {}, nexus {}",
                result.outcome.lane,
                result.outcome.attacker,
                result.outcome.attacker_dealt,
                result.outcome.defender_dealt,
                result.outcome.nexus_damage
            );
            report.nexus_damage += result.outcome.nexus_damage;
            report.cancelled_attack += result.cancelled;
            report.lanes.push(result.outcome);
        }

        let cap = ctx.config.starting_health;
        for (player, amount) in heals {
            let nexus = state.player_mut(player);
            let healed = (nexus.health + amount).min(cap.max(nexus.health)) - nexus.health;
            if healed > 0 {
                nexus.health += healed;
                events.push(GameEvent::NexusHealed { player, amount: healed });
            }
        }

        report.deaths = EffectResolver::settle_deaths(state, ctx, events);

        let combatants: Vec<EntityId> = state
            .lanes
            .iter()
            .flat_map(|l| [l.attacker, l.defender])
            .flatten()
            .collect();
        for unit in combatants {
            if let Some(card) = state.get_card_mut(unit) {
                card.clear_combat_statuses();
            }
        }
        state.return_lanes_to_bench();
        state.combat_resolved = true;

        events.push(GameEvent::CombatResolved {
            attacker: attacker_player,
            nexus_damage: report.nexus_damage,
            deaths: report.deaths.len(),
        });

        report
    }

    fn evaluate_lane(
        lane: usize,
        attacker: Combatant,
        defender: Option<Combatant>,
        defending_player: PlayerId,
    ) -> LaneResult {
        let Some(defender) = defender else {
            return LaneResult {
                outcome: LaneOutcome {
                    lane,
                    attacker: attacker.id,
                    defender: None,
                    attacker_dealt: attacker.attack,
                    defender_dealt: 0,
                    nexus_damage: attacker.attack,
                    quick_strike_kill: false,
                },
                hits: vec![(attacker, DamageTarget::Nexus(defending_player), attacker.attack)],
                health_loss: Vec::new(),
                cancelled: 0,
            };
        };

        let (attacker_strikes, defender_strikes, quick_strike_kill) =
            match (attacker.quick, defender.quick) {
                (true, false) => {
                    let kill = attacker.attack >= defender.effective_health();
                    (true, !kill, kill)
                }
                (false, true) => {
                    let kill = defender.attack >= attacker.effective_health();
                    (!kill, true, kill)
                }
                _ => (true, true, false),
            };

        let attacker_dealt = if attacker_strikes { attacker.attack } else { 0 };
        let defender_dealt = if defender_strikes { defender.attack } else { 0 };

        let mut hits = Vec::new();
        if attacker_strikes {
            hits.push((attacker, DamageTarget::Unit(defender.id), attacker_dealt));
        }
        if defender_strikes {
            hits.push((defender, DamageTarget::Unit(attacker.id), defender_dealt));
        }

        LaneResult {
            outcome: LaneOutcome {
                lane,
                attacker: attacker.id,
                defender: Some(defender.id),
                attacker_dealt,
                defender_dealt,
                nexus_damage: 0,
                quick_strike_kill,
            },
            hits,
            health_loss: vec![
                (defender.id, defender.health_loss(attacker_dealt)),
                (attacker.id, attacker.health_loss(defender_dealt)),
            ],
            cancelled: attacker.attack - attacker_dealt,
        }
    }
}

/// Mark a unit as in combat on one side.
pub(crate) fn enter_combat(card: &mut CardInstance, attacking: bool) {
    if attacking {
        card.exhausted = true;
        card.add_status(StatusEffect::Attacking);
    } else {
        card.add_status(StatusEffect::Blocking);
    }
}
