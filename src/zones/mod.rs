//! Zone system for card locations.
//!
//! Each player owns a deck, hand, bench, discard and one slot per lane.
//!
//! ## Key Types
//!
//! - `ZoneKind`: Which of a player's zones
//! - `ZoneId`: Owner plus kind
//! - `ZoneManager`: Card location tracking and movement
//! - `ZonePosition`: Where to insert into an ordered zone

pub mod manager;

pub use manager::{ZoneId, ZoneKind, ZoneManager, ZonePosition};
