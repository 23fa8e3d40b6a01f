//! Rules configuration.
//!
//! Every numeric policy of the game lives here rather than in the rules
//! code: nexus health, the mana curve, spell-mana banking, zone limits and
//! the lane count. `RulesConfig::default()` is the standard ruleset.
//!
//! ```
//! use tarot_ccg::core::RulesConfig;
//!
//! let config = RulesConfig::default()
//!     .with_starting_health(30)
//!     .with_spell_mana_cap(5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with a `RulesConfig` detected before a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("starting health must be positive, got {0}")]
    NonPositiveHealth(i32),
    #[error("mana cap must be at least 1")]
    ZeroManaCap,
    #[error("spell mana conversion ratio must be at least 1")]
    ZeroConversionRatio,
    #[error("lane count must be between 1 and {max}, got {got}")]
    LaneCount { got: usize, max: usize },
    #[error("bench must hold at least one unit")]
    ZeroBench,
    #[error("starting hand of {hand} exceeds the hand limit of {limit}")]
    StartingHandTooLarge { hand: usize, limit: usize },
}

/// Game rules parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Nexus health each player starts with.
    pub starting_health: i32,

    /// Upper bound for `max_mana`.
    pub max_mana: u32,

    /// Upper bound for banked spell mana.
    pub spell_mana_cap: u32,

    /// Unused mana needed to bank one spell mana at upkeep.
    pub unused_mana_per_spell_mana: u32,

    /// Cards a player may hold. Draws beyond this are burned to discard.
    pub max_hand_size: usize,

    /// Units a player may have on their bench.
    pub max_bench_size: usize,

    /// Number of combat lanes.
    pub lane_count: usize,

    /// Cards drawn before the mulligan.
    pub starting_hand_size: usize,

    /// Cards each player draws at upkeep.
    pub draws_per_round: usize,

    /// A player who must draw from an empty deck loses.
    pub deck_out_loses: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            max_mana: 10,
            spell_mana_cap: 3,
            unused_mana_per_spell_mana: 1,
            max_hand_size: 10,
            max_bench_size: 6,
            lane_count: 7,
            starting_hand_size: 4,
            draws_per_round: 1,
            deck_out_loses: true,
        }
    }
}

impl RulesConfig {
    /// Lane indices are stored as `u8` in zone keys.
    pub const MAX_LANES: usize = u8::MAX as usize;

    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    #[must_use]
    pub fn with_max_mana(mut self, max: u32) -> Self {
        self.max_mana = max;
        self
    }

    #[must_use]
    pub fn with_spell_mana_cap(mut self, cap: u32) -> Self {
        self.spell_mana_cap = cap;
        self
    }

    #[must_use]
    pub fn with_spell_mana_ratio(mut self, unused_per_spell_mana: u32) -> Self {
        self.unused_mana_per_spell_mana = unused_per_spell_mana;
        self
    }

    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_max_bench_size(mut self, size: usize) -> Self {
        self.max_bench_size = size;
        self
    }

    #[must_use]
    pub fn with_lane_count(mut self, lanes: usize) -> Self {
        self.lane_count = lanes;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_draws_per_round(mut self, draws: usize) -> Self {
        self.draws_per_round = draws;
        self
    }

    #[must_use]
    pub fn with_deck_out_loses(mut self, loses: bool) -> Self {
        self.deck_out_loses = loses;
        self
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health <= 0 {
            return Err(ConfigError::NonPositiveHealth(self.starting_health));
        }
        if self.max_mana == 0 {
            return Err(ConfigError::ZeroManaCap);
        }
        if self.unused_mana_per_spell_mana == 0 {
            return Err(ConfigError::ZeroConversionRatio);
        }
        if self.lane_count == 0 || self.lane_count > Self::MAX_LANES {
            return Err(ConfigError::LaneCount {
                got: self.lane_count,
                max: Self::MAX_LANES,
            });
        }
        if self.max_bench_size == 0 {
            return Err(ConfigError::ZeroBench);
        }
        if self.starting_hand_size > self.max_hand_size {
            return Err(ConfigError::StartingHandTooLarge {
                hand: self.starting_hand_size,
                limit: self.max_hand_size,
            });
        }
        Ok(())
    }
}
