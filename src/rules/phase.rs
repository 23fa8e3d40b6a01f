//! Phase state machine.
//!
//! ```text
//! mulligan → main → declare_attackers → declare_defenders
//!   → position_attackers → position_defenders → commit_combat
//!   → combat → end → main (next round) ...
//!            main → end (pass)
//! ```
//!
//! This module knows which phase each action belongs to, who must act in
//! each phase, and how the phase-level transitions (including upkeep)
//! change the state. Per-action legality lives in `validator`.

use log::{debug, info};

use super::mana;
use crate::core::{Action, GameState, Phase, PlayerId, RulesConfig};
use crate::events::GameEvent;

/// Phases in which an action may be submitted.
#[must_use]
pub fn phases_for(action: &Action) -> &'static [Phase] {
    match action {
        Action::Mulligan { .. } => &[Phase::Mulligan],
        Action::PlayCard { .. } | Action::StartAttack | Action::Pass => &[Phase::Main],
        Action::DeclareAttackers { .. } => &[Phase::DeclareAttackers],
        Action::DeclareDefenders { .. } => &[Phase::DeclareDefenders],
        Action::Reposition { .. } | Action::ConfirmPositions => {
            &[Phase::PositionAttackers, Phase::PositionDefenders]
        }
        Action::CommitCombat => &[Phase::CommitCombat],
        Action::ResolveCombat | Action::EndCombat => &[Phase::Combat],
        Action::StartRound => &[Phase::End],
    }
}

/// The player who must act next, or `None` once the game is over.
///
/// In `combat` and `end` either player may drive the game forward; the
/// attacker and the active player respectively are named here.
#[must_use]
pub fn responsible_player(state: &GameState) -> Option<PlayerId> {
    if state.is_over() {
        return None;
    }

    let attacker = state.attacking_player.unwrap_or(state.active_player);
    let player = match state.phase {
        Phase::Mulligan => PlayerId::all().find(|&p| !state.player(p).mulligan_done)?,
        Phase::Main | Phase::End => state.active_player,
        Phase::DeclareAttackers
        | Phase::PositionAttackers
        | Phase::CommitCombat
        | Phase::Combat => attacker,
        Phase::DeclareDefenders | Phase::PositionDefenders => attacker.opponent(),
    };
    Some(player)
}

/// Whether any player may submit this action (given the right phase).
#[must_use]
pub fn is_open_action(action: &Action) -> bool {
    matches!(
        action,
        Action::Mulligan { .. } | Action::ResolveCombat | Action::EndCombat | Action::StartRound
    )
}

/// Move to a new phase and record the change.
pub fn set_phase(state: &mut GameState, to: Phase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    debug!("phase {} -> {}", from, to);
    state.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
}

/// `end → main`: upkeep for both players, then hand the round over.
///
/// For each player unused mana is banked, `max_mana` grows and refills,
/// exhaustion and stuns clear and the round's draws happen. The attack
/// token and the active seat pass to the other player.
pub fn run_upkeep(state: &mut GameState, config: &RulesConfig, events: &mut Vec<GameEvent>) {
    let ending = state.active_player;
    events.push(GameEvent::TurnEnded {
        player: ending,
        round: state.round,
    });

    for player in PlayerId::all() {
        let p = state.player_mut(player);
        mana::bank_unused(p, config);
        mana::grow_and_refill(p, config);
    }

    let in_play: Vec<_> = PlayerId::all()
        .flat_map(|p| state.units_in_play(p))
        .collect();
    for unit in in_play {
        if let Some(card) = state.get_card_mut(unit) {
            card.exhausted = false;
            card.remove_status(crate::cards::StatusEffect::Stunned);
        }
    }

    for player in PlayerId::all() {
        for _ in 0..config.draws_per_round {
            let outcome = state.draw_card(player, config.max_hand_size);
            events.extend(GameEvent::from_draw(player, outcome));
        }
    }

    let next = ending.opponent();
    state.player_mut(ending).has_attack_token = false;
    state.player_mut(next).has_attack_token = true;
    state.active_player = next;
    state.attacking_player = None;
    state.round += 1;
    state.turn += 1;
    state.can_rearrange_cards = true;
    state.combat_resolved = false;

    info!("round {} begins, {} is active", state.round, next);
    set_phase(state, Phase::Main, events);
    events.push(GameEvent::TurnStarted {
        player: next,
        round: state.round,
    });
}
