//! Win conditions, polled after every committed action.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId, RulesConfig};
use crate::rules::GameResult;

/// Result of a win-condition poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinCheck {
    /// The game is decided.
    pub achieved: bool,
    /// `None` with `achieved` set means a draw.
    pub winner: Option<PlayerId>,
}

impl WinCheck {
    pub const ONGOING: WinCheck = WinCheck {
        achieved: false,
        winner: None,
    };

    #[must_use]
    pub const fn winner(player: PlayerId) -> Self {
        Self {
            achieved: true,
            winner: Some(player),
        }
    }

    #[must_use]
    pub const fn draw() -> Self {
        Self {
            achieved: true,
            winner: None,
        }
    }

    /// The outcome to record, if the game is decided.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.achieved {
            return None;
        }
        Some(match self.winner {
            Some(player) => GameResult::Winner(player),
            None => GameResult::Draw,
        })
    }
}

/// Decides when the game is over.
pub trait WinConditionService {
    fn check_conditions(&self, state: &GameState) -> WinCheck;
}

/// Nexus at or below zero loses; both at once is a draw. Optionally, a
/// player who had to draw from an empty deck loses too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardVictory {
    pub deck_out_loses: bool,
}

impl Default for StandardVictory {
    fn default() -> Self {
        Self {
            deck_out_loses: true,
        }
    }
}

impl StandardVictory {
    #[must_use]
    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            deck_out_loses: config.deck_out_loses,
        }
    }

    fn has_lost(&self, state: &GameState, player: PlayerId) -> bool {
        let p = state.player(player);
        p.is_defeated() || (self.deck_out_loses && p.decked_out)
    }
}

impl WinConditionService for StandardVictory {
    fn check_conditions(&self, state: &GameState) -> WinCheck {
        let one_lost = self.has_lost(state, PlayerId::ONE);
        let two_lost = self.has_lost(state, PlayerId::TWO);

        match (one_lost, two_lost) {
            (true, true) => WinCheck::draw(),
            (true, false) => WinCheck::winner(PlayerId::TWO),
            (false, true) => WinCheck::winner(PlayerId::ONE),
            (false, false) => WinCheck::ONGOING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(&RulesConfig::default(), 0)
    }

    #[test]
    fn test_ongoing() {
        let check = StandardVictory::default().check_conditions(&state());
        assert_eq!(check, WinCheck::ONGOING);
        assert_eq!(check.result(), None);
    }

    #[test]
    fn test_nexus_destroyed() {
        let mut state = state();
        state.player_mut(PlayerId::TWO).health = 0;

        let check = StandardVictory::default().check_conditions(&state);
        assert_eq!(check.winner, Some(PlayerId::ONE));
        assert_eq!(check.result(), Some(GameResult::Winner(PlayerId::ONE)));
    }

    #[test]
    fn test_simultaneous_defeat_is_draw() {
        let mut state = state();
        state.player_mut(PlayerId::ONE).health = -1;
        state.player_mut(PlayerId::TWO).health = 0;

        let check = StandardVictory::default().check_conditions(&state);
        assert_eq!(check.result(), Some(GameResult::Draw));
    }

    #[test]
    fn test_deck_out() {
        let mut state = state();
        state.player_mut(PlayerId::ONE).decked_out = true;

        let check = StandardVictory::default().check_conditions(&state);
        assert_eq!(check.winner, Some(PlayerId::TWO));

        let lenient = StandardVictory::from_config(&RulesConfig::default().with_deck_out_loses(false));
        assert_eq!(lenient.check_conditions(&state), WinCheck::ONGOING);
    }
}
