//! Uniformly random baseline agent

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::{Agent, playable_moves},
    tictactoe::BoardState,
};

/// Random policy agent (baseline)
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a random agent seeded from the process-level generator
    pub fn new() -> Self {
        Self {
            name: "Random".to_string(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "Random".to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn decide(&mut self, state: &BoardState) -> Result<usize> {
        let moves = playable_moves(state)?;
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::EmptyMoveSet)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
