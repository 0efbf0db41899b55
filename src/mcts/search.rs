//! MCTS search implementation.
//!
//! Implements the core loop:
//! 1. Selection: descend fully expanded nodes by UCB1
//! 2. Expansion: add one child for an untried move
//! 3. Rollout: uniformly random play-out to a terminal state
//! 4. Backpropagation: update statistics along the path to the root

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Error, Result,
    mcts::{config::MctsConfig, node::NodeId, tree::MctsTree},
    tictactoe::BoardState,
};

/// Result of an MCTS search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Most visited root move, `None` if the root was never expanded
    pub mv: Option<usize>,

    /// `(move, visits)` for each root child
    pub root_visits: Vec<(usize, u32)>,

    /// Number of simulations performed
    pub simulations: u32,

    /// Nodes allocated in the tree
    pub tree_size: usize,
}

/// One MCTS search over a freshly built tree.
pub struct MctsSearch<'a, R: Rng> {
    tree: MctsTree,
    config: &'a MctsConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng> MctsSearch<'a, R> {
    pub fn new(state: BoardState, config: &'a MctsConfig, rng: &'a mut R) -> Self {
        Self {
            tree: MctsTree::new(state),
            config,
            rng,
        }
    }

    /// Run the configured number of simulations.
    pub fn run(mut self) -> Result<SearchResult> {
        for _ in 0..self.config.num_simulations {
            self.simulate()?;
        }

        Ok(SearchResult {
            mv: self.tree.best_move(),
            root_visits: self.tree.root_visits(),
            simulations: self.config.num_simulations,
            tree_size: self.tree.len(),
        })
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self) -> Result<()> {
        let selected = self.select();
        let leaf = self.tree.expand(selected)?.unwrap_or(selected);

        let result = rollout(&self.tree.get(leaf).state, &mut *self.rng)?;
        self.tree.backpropagate(leaf, result);

        trace!(leaf = leaf.0, result, "MCTS simulation complete");
        Ok(())
    }

    /// Descend while the node is non-terminal and fully expanded.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal || !node.is_fully_expanded() {
                return current;
            }
            match self.tree.select_child(current, self.config.exploration) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }
}

/// Play uniformly random moves from `state` until the game ends.
///
/// Returns +1 if the side to move in `state` wins, -1 if it loses and 0 for a
/// draw. The caller's state is not modified.
pub fn rollout<R: Rng + ?Sized>(state: &BoardState, rng: &mut R) -> Result<i8> {
    let player = state.to_move;
    let mut current = *state;

    while !current.is_terminal() {
        let moves = current.legal_moves();
        let mv = *moves.choose(rng).ok_or(Error::EmptyMoveSet)?;
        current = current.make_move(mv)?;
    }

    Ok(match current.winner() {
        Some(winner) if winner == player => 1,
        Some(_) => -1,
        None => 0,
    })
}
