//! Game phases.

use serde::{Deserialize, Serialize};

/// A step of the round cycle.
///
/// `Mulligan` happens once per game. Every round then runs
/// `Main → DeclareAttackers → DeclareDefenders → PositionAttackers →
/// PositionDefenders → CommitCombat → Combat → End`, skipping straight from
/// `Main` to `End` when the active player does not attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Mulligan,
    Main,
    DeclareAttackers,
    DeclareDefenders,
    PositionAttackers,
    PositionDefenders,
    CommitCombat,
    Combat,
    End,
}

impl Phase {
    /// Phases during which an attacking player is fixed.
    #[must_use]
    pub const fn is_combat_sequence(self) -> bool {
        matches!(
            self,
            Phase::DeclareAttackers
                | Phase::DeclareDefenders
                | Phase::PositionAttackers
                | Phase::PositionDefenders
                | Phase::CommitCombat
                | Phase::Combat
        )
    }

    /// Phases in which the defending player is the one expected to act.
    #[must_use]
    pub const fn is_defender_step(self) -> bool {
        matches!(self, Phase::DeclareDefenders | Phase::PositionDefenders)
    }

    /// Snake-case name used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Mulligan => "mulligan",
            Phase::Main => "main",
            Phase::DeclareAttackers => "declare_attackers",
            Phase::DeclareDefenders => "declare_defenders",
            Phase::PositionAttackers => "position_attackers",
            Phase::PositionDefenders => "position_defenders",
            Phase::CommitCombat => "commit_combat",
            Phase::Combat => "combat",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
