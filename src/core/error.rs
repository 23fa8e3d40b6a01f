//! Rule violations.
//!
//! Every variant is recoverable: the state the action was applied to is
//! untouched and the caller may submit a corrected action.

use thiserror::Error;

use super::entity::EntityId;
use super::phase::Phase;
use super::player::PlayerId;
use crate::zones::ZoneKind;

/// Why an action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("{action} is not legal during the {phase} phase")]
    PhaseViolation { action: &'static str, phase: Phase },

    #[error("{player} cannot act now")]
    NotYourTurn { player: PlayerId },

    #[error("card costs {cost} but only {available} mana is available")]
    InsufficientMana { cost: u32, available: u32 },

    #[error("{zone:?} is full ({capacity} cards)")]
    ZoneCapacityExceeded { zone: ZoneKind, capacity: usize },

    #[error("{0} is not a valid card for this action")]
    InvalidCardReference(EntityId),

    #[error("{0} was assigned more than once")]
    DuplicateAssignment(EntityId),

    #[error("lane {0} was assigned more than once")]
    DuplicateLane(usize),

    #[error("card cannot be played to that destination")]
    InvalidDestination,

    #[error("lane {0} does not exist or holds no attacker")]
    InvalidLane(usize),

    #[error("{defender} cannot block {attacker}")]
    IllegalBlock { attacker: EntityId, defender: EntityId },

    #[error("cards cannot be rearranged this combat")]
    RearrangeLocked,

    #[error("no unit is able to attack")]
    NoEligibleAttackers,

    #[error("declaration must name at least one unit")]
    EmptyDeclaration,

    #[error("{0} has already taken a mulligan")]
    MulliganAlreadyUsed(PlayerId),

    #[error("combat has not been resolved")]
    CombatNotResolved,

    #[error("the game is over")]
    GameOver,
}

/// Result alias for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;
