//! # tarot-ccg
//!
//! Rules engine for a two-player, lane-based tarot card game.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every operation takes a `&GameState` and
//!    returns a new state plus the events it produced. A rejected action
//!    leaves the input untouched.
//!
//! 2. **One Definition of Legality**: The validator is the only place that
//!    decides whether an action is legal. `legal_actions` and the AI reuse
//!    it.
//!
//! 3. **Deterministic**: All randomness comes from the state's seeded RNG,
//!    so a seed and an action sequence reproduce a game exactly.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Cheap cloning via `im-rs`, since every
//!   action works on a copy.
//!
//! - **Injected Collaborators**: The card catalog, synergy bonuses and win
//!   conditions are traits handed to `TarotGame`; there is no global state.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, phases, actions, errors, RNG, config, state
//! - `zones`: Deck, hand, bench, lane and discard bookkeeping
//! - `cards`: Card templates, instances and the catalog
//! - `effects`: Card abilities and their resolution
//! - `events`: Game events and the subscriber bus
//! - `services`: Synergy bonuses and win conditions
//! - `rules`: Phase machine, validator, mana and combat
//! - `games`: The tarot game and its builder
//! - `ai`: Heuristic opponent
//! - `session`: Single-writer match driver

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod events;
pub mod services;
pub mod rules;
pub mod games;
pub mod ai;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap, Player,
    GameRng, GameRngState,
    Phase, RulesConfig, ConfigError,
    Action, ActionRecord, DefenderAssignment, Destination,
    RuleError, RuleResult,
    GameState, Lane,
};

pub use crate::zones::{ZoneId, ZoneKind, ZoneManager, ZonePosition};

pub use crate::cards::{
    CardId, CardDefinition, CardInstance, CardType, Element, Keyword, ZodiacClass,
    CardCatalog, CardRegistry, CatalogError,
};

pub use crate::effects::{Ability, AbilityTrigger, Effect, EffectTarget};

pub use crate::events::{EventBus, EventLog, EventSubscriber, GameEvent};

pub use crate::services::{
    ElementalSynergy, NoSynergy, StatModifier, SynergyService,
    StandardVictory, WinCheck, WinConditionService,
};

pub use crate::rules::{CombatReport, GameResult, RulesEngine, Transition};

pub use crate::games::tarot::{SetupError, TarotGame, TarotGameBuilder};

pub use crate::ai::{AiConfig, AiPlayer};

pub use crate::session::Match;
