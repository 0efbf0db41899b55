//! Rule-based agent
//!
//! Rules are tried in strict priority order and the first match wins:
//!
//! 1. Complete three in a row for the side to move
//! 2. Block the opponent's completing cell
//! 3. Take the center
//! 4. Take the first empty corner of `{0, 2, 6, 8}`
//! 5. Take the first empty edge of `{1, 3, 5, 7}`
//! 6. Take the first legal move

use crate::{
    Error, Result,
    ports::{Agent, playable_moves},
    tictactoe::{BoardState, LineAnalyzer},
};

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];
const EDGES: [usize; 4] = [1, 3, 5, 7];

/// Deterministic rule-cascade agent
#[derive(Debug, Clone)]
pub struct HeuristicAgent {
    name: String,
}

impl HeuristicAgent {
    pub fn new() -> Self {
        Self {
            name: "Heuristic".to_string(),
        }
    }

    /// Apply the rule cascade to `state` for the player to move.
    ///
    /// Returns `None` only when the board has no empty cell.
    pub fn choose(state: &BoardState) -> Option<usize> {
        let me = state.to_move;

        LineAnalyzer::completing_move(&state.cells, me)
            .or_else(|| LineAnalyzer::completing_move(&state.cells, me.opponent()))
            .or_else(|| state.is_empty(CENTER).then_some(CENTER))
            .or_else(|| CORNERS.into_iter().find(|&pos| state.is_empty(pos)))
            .or_else(|| EDGES.into_iter().find(|&pos| state.is_empty(pos)))
            .or_else(|| state.legal_moves().first().copied())
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for HeuristicAgent {
    fn decide(&mut self, state: &BoardState) -> Result<usize> {
        playable_moves(state)?;
        Self::choose(state).ok_or(Error::EmptyMoveSet)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
