//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of simulations to run per decision.
    pub num_simulations: u32,

    /// Exploration constant `C` of the UCB1 formula (about √2).
    pub exploration: f64,

    /// Seed for rollouts and the fallback move; `None` draws one from the
    /// process-level generator.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            exploration: 1.414,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, seeded config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 200,
            seed: Some(0),
            ..Self::default()
        }
    }

    pub fn with_simulations(mut self, num_simulations: u32) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject exploration constants that would break UCB1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for negative or non-finite
    /// exploration.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "exploration must be finite and non-negative, got {}",
                    self.exploration
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_ucb1() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 1000);
        assert!((config.exploration - 2f64.sqrt()).abs() < 1e-3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_negative_exploration() {
        let config = MctsConfig::default().with_exploration(-1.0);
        assert!(config.validate().is_err());
    }
}
