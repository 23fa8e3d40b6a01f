//! Tarot card game.
//!
//! Two players, a shared row of combat lanes and a nexus each:
//! - Units are played from hand to a bench, then sent into lanes to attack
//! - The attack token alternates every round; the holder may attack once
//! - Combat is lane by lane; unblocked attackers strike the enemy nexus
//! - A nexus at 0 health loses the game

mod builder;
mod game;

pub use builder::{SetupError, TarotGameBuilder};
pub use game::TarotGame;
