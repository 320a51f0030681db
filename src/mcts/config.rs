//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Multiplier on the UCT exploration term (default: 1.0).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Small constant added to visit counts so unvisited children score finitely.
    /// Also scales the random tie-break term.
    pub epsilon: f64,

    /// Random seed for selection tie-breaks and rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Maximum plies per rollout (0 = unlimited).
    /// A rollout that hits the cap scores as a draw.
    pub max_rollout_plies: u32,

    /// Maximum nodes to allocate in the tree.
    /// `search` stops once the tree reaches this size.
    pub max_nodes: usize,

    /// Wall-clock budget for `search` in milliseconds (0 = none).
    pub time_budget_ms: u64,

    /// Read the exploitation term from the point of view of the player to
    /// move at the parent (default: false, every node maximizes the white value).
    pub side_relative_values: bool,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            epsilon: 1e-6,
            seed: 42,
            max_rollout_plies: 2_000,
            max_nodes: 100_000,
            time_budget_ms: 0,
            side_relative_values: false,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_rollout_plies(mut self, plies: u32) -> Self {
        self.max_rollout_plies = plies;
        self
    }

    #[must_use]
    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Switch between side-relative and white-perspective exploitation.
    #[must_use]
    pub fn with_side_relative_values(mut self, enabled: bool) -> Self {
        self.side_relative_values = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MCTSConfig::default();
        assert_eq!(config.exploration_constant, 1.0);
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_rollout_plies, 2_000);
        assert_eq!(config.time_budget_ms, 0);
        assert!(!config.side_relative_values);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MCTSConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_max_nodes(500)
            .with_max_rollout_plies(0)
            .with_side_relative_values(true);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_nodes, 500);
        assert_eq!(config.max_rollout_plies, 0);
        assert!(config.side_relative_values);
    }

    #[test]
    fn test_serialization() {
        let config = MCTSConfig::default().with_time_budget_ms(250);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.seed, deserialized.seed);
        assert_eq!(deserialized.time_budget_ms, 250);
    }
}
