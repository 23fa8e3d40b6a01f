//! Collaborator services injected into the game.
//!
//! ## Key Types
//!
//! - `SynergyService`: Combat bonuses (`NoSynergy`, `ElementalSynergy`)
//! - `WinConditionService`: End-of-game detection (`StandardVictory`)

pub mod synergy;
pub mod victory;

pub use synergy::{ElementalSynergy, NoSynergy, StatModifier, SynergyService};
pub use victory::{StandardVictory, WinCheck, WinConditionService};
