//! Rules engine trait for game implementations.
//!
//! A rules engine answers three questions about a state:
//! - What actions are legal for a player
//! - What state (and events) an action produces
//! - Whether the game is over
//!
//! `apply_action` never mutates its input: it returns a `Transition` with a
//! new state, or a `RuleError` with the input untouched.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState, PlayerId, RuleResult, RulesConfig};
use crate::events::GameEvent;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both nexuses fell at once.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// A committed action: the replacement state and what happened, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Transition {
    #[must_use]
    pub fn new(state: GameState, events: Vec<GameEvent>) -> Self {
        Self { state, events }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `apply_action`: Must be deterministic for replay
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the rules configuration.
    fn config(&self) -> &RulesConfig;

    /// Check an action without applying it.
    fn validate(&self, state: &GameState, player: PlayerId, action: &Action) -> RuleResult<()>;

    /// Enumerate legal actions for a player.
    ///
    /// Combinatorial declarations are sampled (single units and the full
    /// set), not exhaustively listed.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action to a copy of the game state.
    fn apply_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> RuleResult<Transition>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    fn is_legal(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.validate(state, player, action).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::TWO);
        assert!(!result.is_winner(PlayerId::ONE));
        assert!(result.is_winner(PlayerId::TWO));
        assert_eq!(result.winner(), Some(PlayerId::TWO));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::ONE));
        assert_eq!(draw.winner(), None);
    }
}
