//! The AI seat.

use log::{debug, warn};

use super::config::AiConfig;
use super::decision::{decide_attackers, decide_card_plays, decide_defenders, decide_mulligan};
use crate::core::{Action, GameState, Phase, PlayerId};
use crate::games::tarot::TarotGame;
use crate::rules::{responsible_player, validator, RulesEngine};

/// A heuristic player bound to one seat.
#[derive(Clone, Debug)]
pub struct AiPlayer {
    player: PlayerId,
    config: AiConfig,
}

impl AiPlayer {
    #[must_use]
    pub fn new(player: PlayerId, config: AiConfig) -> Self {
        Self { player, config }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Whether this seat is the one expected to act.
    #[must_use]
    pub fn should_act(&self, state: &GameState) -> bool {
        match state.phase {
            Phase::Mulligan => !state.is_over() && !state.player(self.player).mulligan_done,
            _ => responsible_player(state) == Some(self.player),
        }
    }

    /// The next action for this seat, or `None` when it is not its turn to
    /// act.
    ///
    /// The heuristic's choice is validated first; if it is illegal the
    /// seat's safe default for the phase is proposed instead.
    #[must_use]
    pub fn propose(&self, game: &TarotGame, state: &GameState) -> Option<Action> {
        if !self.should_act(state) {
            return None;
        }

        let action = self.heuristic(game, state);
        match game.validate(state, self.player, &action) {
            Ok(()) => {
                debug!("{} proposes {}", self.player, action.name());
                Some(action)
            }
            Err(err) => {
                warn!("{} rejected own {}: {}", self.player, action.name(), err);
                self.fallback(state)
                    .filter(|fallback| *fallback != action)
                    .filter(|fallback| game.is_legal(state, self.player, fallback))
            }
        }
    }

    fn heuristic(&self, game: &TarotGame, state: &GameState) -> Action {
        let me = self.player;
        match state.phase {
            Phase::Mulligan => Action::Mulligan {
                discard: decide_mulligan(state, me, &self.config),
            },
            Phase::Main => {
                if let Some(play) = decide_card_plays(state, me, game.config()).into_iter().next() {
                    return play;
                }
                let wants_attack = state.player(me).has_attack_token
                    && !decide_attackers(state, me, &self.config).is_empty();
                if wants_attack {
                    Action::StartAttack
                } else {
                    Action::Pass
                }
            }
            Phase::DeclareAttackers => {
                let attackers = decide_attackers(state, me, &self.config);
                if attackers.is_empty() {
                    // Committed to attacking; send the first eligible unit.
                    let first = validator::eligible_attackers(state, me);
                    Action::declare_attackers(&first[..first.len().min(1)])
                } else {
                    Action::declare_attackers(&attackers)
                }
            }
            Phase::DeclareDefenders => Action::DeclareDefenders {
                assignments: decide_defenders(state, me, &self.config),
            },
            Phase::PositionAttackers | Phase::PositionDefenders => Action::ConfirmPositions,
            Phase::CommitCombat => Action::CommitCombat,
            Phase::Combat if state.combat_resolved => Action::EndCombat,
            Phase::Combat => Action::ResolveCombat,
            Phase::End => Action::StartRound,
        }
    }

    fn fallback(&self, state: &GameState) -> Option<Action> {
        let action = match state.phase {
            Phase::Mulligan => Action::Mulligan { discard: Vec::new() },
            Phase::Main => Action::Pass,
            Phase::DeclareAttackers => {
                let first = validator::eligible_attackers(state, self.player);
                Action::declare_attackers(first.first().map(std::slice::from_ref)?)
            }
            Phase::DeclareDefenders => Action::DeclareDefenders {
                assignments: Vec::new(),
            },
            Phase::PositionAttackers | Phase::PositionDefenders => Action::ConfirmPositions,
            Phase::CommitCombat => Action::CommitCombat,
            Phase::Combat if state.combat_resolved => Action::EndCombat,
            Phase::Combat => Action::ResolveCombat,
            Phase::End => Action::StartRound,
        };
        Some(action)
    }
}
