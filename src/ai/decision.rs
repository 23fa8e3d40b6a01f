//! Heuristic decisions.
//!
//! Each function reads the state and returns what it would submit; none
//! of them check phase or turn order. `AiPlayer` wraps them and validates
//! the result before proposing it.

use crate::cards::{CardInstance, CardType, Keyword};
use crate::core::{
    Action, DefenderAssignment, Destination, EntityId, GameRng, GameState, PlayerId, RulesConfig,
};
use crate::rules::validator;

use super::config::AiConfig;

/// How good a block is for the defender, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockValue {
    /// Defender dies without killing the attacker.
    Chump,
    /// Defender survives without killing the attacker.
    Survive,
    /// Both die and the defender cost no more than the attacker.
    Trade,
    /// Attacker dies and the defender survives.
    Win,
}

impl BlockValue {
    /// Worth blocking without being forced to.
    #[must_use]
    pub fn is_favorable(self) -> bool {
        self >= BlockValue::Survive
    }
}

/// Evaluate `defender` blocking `attacker`, including first strikes.
#[must_use]
pub fn evaluate_block(attacker: &CardInstance, defender: &CardInstance) -> BlockValue {
    let attacker_quick = attacker.has_keyword(Keyword::QuickAttack);
    let defender_quick = defender.has_keyword(Keyword::QuickAttack);

    let mut kills = defender.attack >= attacker.current_health;
    let mut dies = attacker.attack >= defender.current_health;
    if attacker_quick && !defender_quick && dies {
        kills = false;
    }
    if defender_quick && !attacker_quick && kills {
        dies = false;
    }

    match (kills, dies) {
        (true, false) => BlockValue::Win,
        (true, true) if defender.cost <= attacker.cost => BlockValue::Trade,
        (false, false) => BlockValue::Survive,
        _ => BlockValue::Chump,
    }
}

/// Cards to send back during the mulligan: everything over the cost
/// threshold.
#[must_use]
pub fn decide_mulligan(state: &GameState, me: PlayerId, config: &AiConfig) -> Vec<EntityId> {
    state
        .hand(me)
        .into_iter()
        .filter(|&e| {
            state
                .get_card(e)
                .is_some_and(|c| c.cost > config.mulligan_cost_threshold)
        })
        .collect()
}

/// Defender assignments for the lanes currently under attack.
///
/// Lanes are considered most threatening first. Each lane gets the best
/// favorable block (cheapest on equal value); when the damage left
/// unblocked would be lethal, the biggest remaining attackers are chump
/// blocked.
#[must_use]
pub fn decide_defenders(state: &GameState, me: PlayerId, config: &AiConfig) -> Vec<DefenderAssignment> {
    let mut rng = GameRng::new(config.seed ^ u64::from(state.round));

    let mut threats: Vec<(usize, &CardInstance)> = state
        .lanes
        .iter()
        .enumerate()
        .filter_map(|(lane, slot)| Some((lane, state.get_card(slot.attacker?)?)))
        .collect();
    threats.sort_by(|(la, a), (lb, b)| b.attack.cmp(&a.attack).then(la.cmp(lb)));

    let mut available: Vec<&CardInstance> = state
        .bench(me)
        .into_iter()
        .filter_map(|e| state.get_card(e))
        .filter(|c| c.can_block())
        .collect();

    let mut assignments = Vec::new();
    let mut unblocked = Vec::new();

    for &(lane, attacker) in &threats {
        let scored: Vec<(BlockValue, &CardInstance)> = available
            .iter()
            .filter(|d| d.can_block_attacker(attacker))
            .map(|&d| (evaluate_block(attacker, d), d))
            .filter(|(value, _)| value.is_favorable())
            .collect();

        let Some(best) = scored
            .iter()
            .map(|&(value, d)| (value, std::cmp::Reverse(d.cost)))
            .max()
        else {
            unblocked.push((lane, attacker));
            continue;
        };
        let ties: Vec<EntityId> = scored
            .iter()
            .filter(|&&(value, d)| (value, std::cmp::Reverse(d.cost)) == best)
            .map(|(_, d)| d.entity_id)
            .collect();

        if let Some(&defender) = rng.choose(&ties) {
            assignments.push(DefenderAssignment::new(lane, defender));
            available.retain(|d| d.entity_id != defender);
        }
    }

    if config.chump_block {
        let health = state.player(me).health;
        let mut incoming: i32 = unblocked.iter().map(|(_, a)| a.attack).sum();
        // `unblocked` keeps the threat order, biggest first.
        for &(lane, attacker) in &unblocked {
            if incoming < health {
                break;
            }
            let chump = available
                .iter()
                .filter(|d| d.can_block_attacker(attacker))
                .min_by_key(|d| (d.cost, d.attack, d.entity_id))
                .map(|d| d.entity_id);
            if let Some(defender) = chump {
                assignments.push(DefenderAssignment::new(lane, defender));
                available.retain(|d| d.entity_id != defender);
                incoming -= attacker.attack;
            }
        }
    }

    assignments.sort_by_key(|a| a.attacker_lane);
    assignments
}

/// Units to declare as attackers, in lane order.
///
/// Everything attacks when the strongest units fitting in the lanes deal
/// lethal damage; otherwise only units no enemy can block favorably.
#[must_use]
pub fn decide_attackers(state: &GameState, me: PlayerId, _config: &AiConfig) -> Vec<EntityId> {
    let mut eligible: Vec<&CardInstance> = validator::eligible_attackers(state, me)
        .into_iter()
        .filter_map(|e| state.get_card(e))
        .collect();
    eligible.sort_by(|a, b| b.attack.cmp(&a.attack).then(a.entity_id.cmp(&b.entity_id)));
    eligible.truncate(state.lanes.len());

    let enemy = me.opponent();
    let lethal: i32 = eligible.iter().map(|c| c.attack).sum();
    if lethal >= state.player(enemy).health {
        return eligible.iter().map(|c| c.entity_id).collect();
    }

    let blockers: Vec<&CardInstance> = state
        .bench(enemy)
        .into_iter()
        .filter_map(|e| state.get_card(e))
        .filter(|c| c.can_block())
        .collect();

    eligible
        .into_iter()
        .filter(|attacker| {
            !blockers.iter().any(|b| {
                b.can_block_attacker(attacker)
                    && evaluate_block(attacker, b) >= BlockValue::Trade
            })
        })
        .map(|c| c.entity_id)
        .collect()
}

/// Cards to play this main phase, in order.
///
/// Greedy: the most expensive affordable units first while the bench has
/// room, then whatever spells the remaining mana covers.
#[must_use]
pub fn decide_card_plays(state: &GameState, me: PlayerId, rules: &RulesConfig) -> Vec<Action> {
    let mut hand: Vec<&CardInstance> = state
        .hand(me)
        .into_iter()
        .filter_map(|e| state.get_card(e))
        .collect();
    hand.sort_by(|a, b| b.cost.cmp(&a.cost).then(a.entity_id.cmp(&b.entity_id)));

    let mut budget = state.player(me).available_mana();
    let mut bench_room = rules.max_bench_size.saturating_sub(state.bench_size(me));
    let mut plays = Vec::new();

    for card in hand.iter().filter(|c| c.card_type == CardType::Unit) {
        if bench_room > 0 && card.cost <= budget {
            budget -= card.cost;
            bench_room -= 1;
            plays.push(Action::PlayCard {
                card: card.entity_id,
                destination: Destination::Bench,
            });
        }
    }
    for card in hand.iter().filter(|c| c.card_type == CardType::Spell) {
        if card.cost <= budget {
            budget -= card.cost;
            plays.push(Action::PlayCard {
                card: card.entity_id,
                destination: Destination::Resolve,
            });
        }
    }

    plays
}
