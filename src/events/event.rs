//! Domain events.
//!
//! Every committed transition returns the ordered list of `GameEvent`s it
//! produced. Presentation layers (UI, logs, sound) subscribe to these
//! instead of diffing states.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{DefenderAssignment, DrawOutcome, EntityId, Phase, PlayerId};
use crate::rules::GameResult;

/// What received damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTarget {
    Unit(EntityId),
    Nexus(PlayerId),
}

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    TurnStarted { player: PlayerId, round: u32 },
    TurnEnded { player: PlayerId, round: u32 },
    CardDrawn { player: PlayerId, card: EntityId },
    /// Drawn into a full hand and moved straight to discard.
    CardBurned { player: PlayerId, card: EntityId },
    MulliganTaken { player: PlayerId, replaced: usize },
    CardPlayed { player: PlayerId, card: EntityId, card_id: CardId },
    AttackDeclared { player: PlayerId, attackers: Vec<EntityId> },
    DefendersAssigned { player: PlayerId, assignments: Vec<DefenderAssignment> },
    DamageDealt { source: EntityId, target: DamageTarget, amount: i32 },
    NexusHealed { player: PlayerId, amount: i32 },
    UnitDied { card: EntityId, owner: PlayerId },
    CombatResolved { attacker: PlayerId, nexus_damage: i32, deaths: usize },
    GameEnded { result: GameResult },
}

/// Discriminant of a `GameEvent`, used for filtered subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PhaseChanged,
    TurnStarted,
    TurnEnded,
    CardDrawn,
    CardBurned,
    MulliganTaken,
    CardPlayed,
    AttackDeclared,
    DefendersAssigned,
    DamageDealt,
    NexusHealed,
    UnitDied,
    CombatResolved,
    GameEnded,
}

impl GameEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::TurnStarted { .. } => EventKind::TurnStarted,
            GameEvent::TurnEnded { .. } => EventKind::TurnEnded,
            GameEvent::CardDrawn { .. } => EventKind::CardDrawn,
            GameEvent::CardBurned { .. } => EventKind::CardBurned,
            GameEvent::MulliganTaken { .. } => EventKind::MulliganTaken,
            GameEvent::CardPlayed { .. } => EventKind::CardPlayed,
            GameEvent::AttackDeclared { .. } => EventKind::AttackDeclared,
            GameEvent::DefendersAssigned { .. } => EventKind::DefendersAssigned,
            GameEvent::DamageDealt { .. } => EventKind::DamageDealt,
            GameEvent::NexusHealed { .. } => EventKind::NexusHealed,
            GameEvent::UnitDied { .. } => EventKind::UnitDied,
            GameEvent::CombatResolved { .. } => EventKind::CombatResolved,
            GameEvent::GameEnded { .. } => EventKind::GameEnded,
        }
    }

    /// Event for a single draw, if the draw moved a card.
    #[must_use]
    pub fn from_draw(player: PlayerId, outcome: DrawOutcome) -> Option<Self> {
        match outcome {
            DrawOutcome::Drawn(card) => Some(GameEvent::CardDrawn { player, card }),
            DrawOutcome::Burned(card) => Some(GameEvent::CardBurned { player, card }),
            DrawOutcome::Empty => None,
        }
    }
}
