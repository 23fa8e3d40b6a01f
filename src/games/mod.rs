//! Game implementations.
//!
//! - `tarot`: the two-player, lane-based tarot card game

pub mod tarot;
