//! Action validation.
//!
//! Every check here is read-only. The game calls `validate` before it
//! clones and mutates anything, and `legal_actions` and the AI reuse the
//! same checks, so there is exactly one definition of legality.

use rustc_hash::FxHashSet;

use super::phase::{is_open_action, phases_for, responsible_player};
use crate::cards::CardType;
use crate::core::{
    Action, DefenderAssignment, Destination, EntityId, GameState, Phase, PlayerId, RuleError,
    RuleResult, RulesConfig,
};
use crate::zones::ZoneKind;

/// How a reposition rearranges the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepositionPlan {
    pub card: EntityId,
    pub from: usize,
    pub to: usize,
    /// The unit on the same side already in `to`; it moves to `from`.
    pub swap_with: Option<EntityId>,
    pub attacker_side: bool,
}

/// Check an action against phase, actor and action-specific rules.
pub fn validate(
    state: &GameState,
    config: &RulesConfig,
    player: PlayerId,
    action: &Action,
) -> RuleResult<()> {
    check_phase_and_actor(state, player, action)?;

    match action {
        Action::Mulligan { discard } => validate_mulligan(state, player, discard),
        Action::PlayCard { card, destination } => {
            validate_play_card(state, config, player, *card, *destination)
        }
        Action::StartAttack => validate_start_attack(state, player),
        Action::DeclareAttackers { attackers } => {
            validate_declare_attackers(state, player, attackers)
        }
        Action::DeclareDefenders { assignments } => {
            validate_declare_defenders(state, player, assignments)
        }
        Action::Reposition { card, lane } => {
            validate_reposition(state, player, *card, *lane).map(|_| ())
        }
        Action::EndCombat => {
            if state.combat_resolved {
                Ok(())
            } else {
                Err(RuleError::CombatNotResolved)
            }
        }
        Action::ConfirmPositions
        | Action::CommitCombat
        | Action::ResolveCombat
        | Action::Pass
        | Action::StartRound => Ok(()),
    }
}

/// Game-over, phase and turn-order checks shared by every action.
pub fn check_phase_and_actor(state: &GameState, player: PlayerId, action: &Action) -> RuleResult<()> {
    if state.is_over() {
        return Err(RuleError::GameOver);
    }

    if !phases_for(action).contains(&state.phase) {
        return Err(RuleError::PhaseViolation {
            action: action.name(),
            phase: state.phase,
        });
    }

    if !is_open_action(action) && responsible_player(state) != Some(player) {
        return Err(RuleError::NotYourTurn { player });
    }

    Ok(())
}

pub fn validate_mulligan(state: &GameState, player: PlayerId, discard: &[EntityId]) -> RuleResult<()> {
    if state.player(player).mulligan_done {
        return Err(RuleError::MulliganAlreadyUsed(player));
    }

    let mut seen = FxHashSet::default();
    for &card in discard {
        if !seen.insert(card) {
            return Err(RuleError::DuplicateAssignment(card));
        }
        if !state.is_in_hand(card, player) {
            return Err(RuleError::InvalidCardReference(card));
        }
    }
    Ok(())
}

pub fn validate_play_card(
    state: &GameState,
    config: &RulesConfig,
    player: PlayerId,
    card: EntityId,
    destination: Destination,
) -> RuleResult<()> {
    if !state.is_in_hand(card, player) {
        return Err(RuleError::InvalidCardReference(card));
    }
    let instance = state
        .get_card(card)
        .ok_or(RuleError::InvalidCardReference(card))?;

    match (instance.card_type, destination) {
        (CardType::Unit, Destination::Bench) => {
            if state.bench_size(player) >= config.max_bench_size {
                return Err(RuleError::ZoneCapacityExceeded {
                    zone: ZoneKind::Bench,
                    capacity: config.max_bench_size,
                });
            }
        }
        (CardType::Spell, Destination::Resolve) => {}
        _ => return Err(RuleError::InvalidDestination),
    }

    super::mana::plan_payment(state.player(player), instance.cost).map(|_| ())
}

pub fn validate_start_attack(state: &GameState, player: PlayerId) -> RuleResult<()> {
    if !state.player(player).has_attack_token {
        return Err(RuleError::NotYourTurn { player });
    }
    if eligible_attackers(state, player).is_empty() {
        return Err(RuleError::NoEligibleAttackers);
    }
    Ok(())
}

pub fn validate_declare_attackers(
    state: &GameState,
    player: PlayerId,
    attackers: &[EntityId],
) -> RuleResult<()> {
    if attackers.is_empty() {
        return Err(RuleError::EmptyDeclaration);
    }
    if attackers.len() > state.lanes.len() {
        return Err(RuleError::InvalidLane(state.lanes.len()));
    }

    let mut seen = FxHashSet::default();
    for &attacker in attackers {
        if !seen.insert(attacker) {
            return Err(RuleError::DuplicateAssignment(attacker));
        }
        let eligible = state.is_on_bench(attacker, player)
            && state.get_card(attacker).is_some_and(|c| c.can_attack());
        if !eligible {
            return Err(RuleError::InvalidCardReference(attacker));
        }
    }
    Ok(())
}

pub fn validate_declare_defenders(
    state: &GameState,
    player: PlayerId,
    assignments: &[DefenderAssignment],
) -> RuleResult<()> {
    let mut lanes = FxHashSet::default();
    let mut defenders = FxHashSet::default();

    for assignment in assignments {
        let lane = assignment.attacker_lane;
        let defender = assignment.defender;

        let attacker = state
            .lanes
            .get(lane)
            .and_then(|l| l.attacker)
            .ok_or(RuleError::InvalidLane(lane))?;
        if !lanes.insert(lane) {
            return Err(RuleError::DuplicateLane(lane));
        }
        if !defenders.insert(defender) {
            return Err(RuleError::DuplicateAssignment(defender));
        }
        if !state.is_on_bench(defender, player) {
            return Err(RuleError::InvalidCardReference(defender));
        }
        check_block(state, attacker, defender)?;
    }
    Ok(())
}

/// Work out how a reposition would rearrange the lanes.
pub fn validate_reposition(
    state: &GameState,
    player: PlayerId,
    card: EntityId,
    to: usize,
) -> RuleResult<RepositionPlan> {
    if !state.can_rearrange_cards {
        return Err(RuleError::RearrangeLocked);
    }
    if to >= state.lanes.len() {
        return Err(RuleError::InvalidLane(to));
    }

    let attacker_side = state.phase == Phase::PositionAttackers;
    let owned = state.get_card(card).is_some_and(|c| c.owner == player);
    let from = state
        .lanes
        .iter()
        .position(|l| {
            let slot = if attacker_side { l.attacker } else { l.defender };
            slot == Some(card)
        })
        .filter(|_| owned)
        .ok_or(RuleError::InvalidCardReference(card))?;

    let target = state.lanes[to];
    let origin = state.lanes[from];

    if attacker_side {
        let swap_with = target.attacker.filter(|&other| other != card);
        // Attackers carry their blockers' legality with them.
        if let Some(defender) = target.defender {
            check_block(state, card, defender)?;
        }
        if let (Some(other), Some(defender)) = (swap_with, origin.defender) {
            check_block(state, other, defender)?;
        }
        Ok(RepositionPlan {
            card,
            from,
            to,
            swap_with,
            attacker_side,
        })
    } else {
        let attacker = target.attacker.ok_or(RuleError::InvalidLane(to))?;
        check_block(state, attacker, card)?;
        let swap_with = target.defender.filter(|&other| other != card);
        if let (Some(other), Some(origin_attacker)) = (swap_with, origin.attacker) {
            check_block(state, origin_attacker, other)?;
        }
        Ok(RepositionPlan {
            card,
            from,
            to,
            swap_with,
            attacker_side,
        })
    }
}

/// Bench units that may be declared as attackers, in bench order.
#[must_use]
pub fn eligible_attackers(state: &GameState, player: PlayerId) -> Vec<EntityId> {
    state
        .bench(player)
        .into_iter()
        .filter(|&e| state.get_card(e).is_some_and(|c| c.can_attack()))
        .collect()
}

/// Bench units that may block `attacker`, in bench order.
#[must_use]
pub fn eligible_blockers(state: &GameState, player: PlayerId, attacker: EntityId) -> Vec<EntityId> {
    state
        .bench(player)
        .into_iter()
        .filter(|&d| check_block(state, attacker, d).is_ok())
        .collect()
}

fn check_block(state: &GameState, attacker: EntityId, defender: EntityId) -> RuleResult<()> {
    let attacking = state
        .get_card(attacker)
        .ok_or(RuleError::InvalidCardReference(attacker))?;
    let blocking = state
        .get_card(defender)
        .ok_or(RuleError::InvalidCardReference(defender))?;

    if blocking.can_block_attacker(attacking) {
        Ok(())
    } else {
        Err(RuleError::IllegalBlock { attacker, defender })
    }
}
