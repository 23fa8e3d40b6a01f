//! AI configuration parameters.

use serde::{Deserialize, Serialize};

/// Heuristic AI configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Seed for tie-breaking. Same seed and state give the same decision.
    pub seed: u64,

    /// Cards costing more than this are sent back during the mulligan.
    pub mulligan_cost_threshold: u32,

    /// Chump block the biggest attackers when unblocked damage is lethal.
    pub chump_block: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mulligan_cost_threshold: 4,
            chump_block: true,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_mulligan_threshold(mut self, cost: u32) -> Self {
        self.mulligan_cost_threshold = cost;
        self
    }

    #[must_use]
    pub fn with_chump_block(mut self, enabled: bool) -> Self {
        self.chump_block = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.mulligan_cost_threshold, 4);
        assert!(config.chump_block);
    }

    #[test]
    fn test_partial_json() {
        let config: AiConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config, AiConfig::default().with_seed(7));
    }
}
