//! Agent wrapper around [`MctsSearch`].

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::debug;

use crate::{
    Error, Result,
    mcts::{MctsConfig, MctsSearch, SearchResult},
    ports::{Agent, playable_moves},
    tictactoe::BoardState,
};

/// Monte Carlo Tree Search agent
///
/// The tree is rebuilt from scratch for every decision; nothing is reused
/// between moves.
#[derive(Debug, Clone)]
pub struct MctsAgent {
    name: String,
    config: MctsConfig,
    rng: StdRng,
    last_search: Option<SearchResult>,
}

impl MctsAgent {
    /// Create an agent from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config is invalid.
    pub fn new(config: MctsConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            name: "MCTS".to_string(),
            config,
            rng,
            last_search: None,
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Statistics of the most recent search, if one ran.
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }
}

impl Agent for MctsAgent {
    fn decide(&mut self, state: &BoardState) -> Result<usize> {
        let moves = playable_moves(state)?;
        if let [only] = moves.as_slice() {
            self.last_search = None;
            return Ok(*only);
        }

        let result = MctsSearch::new(*state, &self.config, &mut self.rng).run()?;
        let mv = match result.mv {
            Some(mv) => mv,
            None => *moves.choose(&mut self.rng).ok_or(Error::EmptyMoveSet)?,
        };

        debug!(
            state = %state.encode(),
            mv,
            simulations = result.simulations,
            tree_size = result.tree_size,
            "MCTS decision"
        );
        self.last_search = Some(result);
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
