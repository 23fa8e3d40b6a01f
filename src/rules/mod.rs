//! Game rules.
//!
//! - `engine`: the `RulesEngine` trait, `Transition` and `GameResult`
//! - `phase`: phase state machine and upkeep
//! - `validator`: read-only legality checks for every action
//! - `mana`: cost payment and spell mana banking
//! - `combat`: lane-by-lane combat resolution
//!
//! Nothing here mutates a caller's state: the game clones first and hands
//! the working copy to these modules.

pub mod combat;
pub mod engine;
pub mod mana;
pub mod phase;
pub mod validator;

pub use combat::{CombatReport, CombatResolver, LaneOutcome};
pub use engine::{GameResult, RulesEngine, Transition};
pub use mana::ManaPayment;
pub use phase::responsible_player;
pub use validator::RepositionPlan;
