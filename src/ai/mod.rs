//! Heuristic AI opponent.
//!
//! The AI only reads the state. Its proposals go through the same
//! validator as a human's actions; a rejected heuristic choice falls back
//! to the safe default for the phase.
//!
//! ## Key Types
//!
//! - `AiConfig`: Seed and thresholds
//! - `AiPlayer`: Proposes the next action for one seat
//! - `decision`: The attack, block, play and mulligan heuristics

mod config;
pub mod decision;
mod player;

pub use config::AiConfig;
pub use decision::{decide_attackers, decide_card_plays, decide_defenders, BlockValue};
pub use player::AiPlayer;
