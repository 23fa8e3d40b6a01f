//! Core engine types: entities, players, phases, actions, errors, RNG,
//! configuration and the `GameState` aggregate.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod phase;
pub mod action;
pub mod error;
pub mod state;

pub use entity::EntityId;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, RulesConfig};
pub use phase::Phase;
pub use action::{Action, ActionRecord, DefenderAssignment, Destination};
pub use error::{RuleError, RuleResult};
pub use state::{DrawOutcome, GameState, Lane};
