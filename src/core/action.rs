//! Player actions.
//!
//! An `Action` is everything a player (human UI or AI) can submit to the
//! engine. Actions carry entity references and lane indices only; whether
//! they are legal is decided by the validator against the current state.
//!
//! ```
//! use tarot_ccg::core::{Action, DefenderAssignment, Destination, EntityId};
//!
//! let play = Action::PlayCard { card: EntityId(12), destination: Destination::Bench };
//! let attack = Action::declare_attackers(&[EntityId(3), EntityId(4)]);
//! let block = Action::DeclareDefenders {
//!     assignments: vec![DefenderAssignment::new(0, EntityId(9))],
//! };
//! assert_eq!(play.name(), "play_card");
//! assert_eq!(attack.name(), "declare_attackers");
//! assert_eq!(block.name(), "declare_defenders");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;

/// Where a played card goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// Units are summoned onto the bench.
    Bench,
    /// Spells resolve immediately and go to discard.
    Resolve,
}

/// A defender blocking the attacker in a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefenderAssignment {
    pub attacker_lane: usize,
    pub defender: EntityId,
}

impl DefenderAssignment {
    #[must_use]
    pub const fn new(attacker_lane: usize, defender: EntityId) -> Self {
        Self {
            attacker_lane,
            defender,
        }
    }
}

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put the listed hand cards back and draw the same number.
    Mulligan { discard: Vec<EntityId> },

    /// Play a card from hand.
    PlayCard {
        card: EntityId,
        destination: Destination,
    },

    /// Use the attack token: `main → declare_attackers`.
    StartAttack,

    /// Choose attackers; they fill lanes in the given order.
    DeclareAttackers { attackers: SmallVec<[EntityId; 7]> },

    /// Block attacking lanes.
    DeclareDefenders { assignments: Vec<DefenderAssignment> },

    /// Move a combatant to another lane during a positioning step.
    Reposition { card: EntityId, lane: usize },

    /// Finish the current positioning step.
    ConfirmPositions,

    /// Freeze lane assignments: `commit_combat → combat`.
    CommitCombat,

    /// Run the combat resolver.
    ResolveCombat,

    /// Leave a resolved combat: `combat → end`.
    EndCombat,

    /// End the main phase without attacking.
    Pass,

    /// Run upkeep and begin the next round: `end → main`.
    StartRound,
}

impl Action {
    /// Convenience constructor for an attacker declaration.
    #[must_use]
    pub fn declare_attackers(attackers: &[EntityId]) -> Self {
        Action::DeclareAttackers {
            attackers: SmallVec::from_slice(attackers),
        }
    }

    /// Stable snake-case name, used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Mulligan { .. } => "mulligan",
            Action::PlayCard { .. } => "play_card",
            Action::StartAttack => "start_attack",
            Action::DeclareAttackers { .. } => "declare_attackers",
            Action::DeclareDefenders { .. } => "declare_defenders",
            Action::Reposition { .. } => "reposition",
            Action::ConfirmPositions => "confirm_positions",
            Action::CommitCombat => "commit_combat",
            Action::ResolveCombat => "resolve_combat",
            Action::EndCombat => "end_combat",
            Action::Pass => "pass",
            Action::StartRound => "start_round",
        }
    }
}

/// A committed action with metadata, kept in the state's history for replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round in which the action was committed.
    pub round: u32,

    /// Position in the game's action history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}
