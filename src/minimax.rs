//! Exhaustive minimax search with alpha-beta pruning
//!
//! The full game tree below any position is at most 9 plies deep, so the
//! search always runs to terminal states. Scores are relative to the player
//! searching: win = +1, loss = -1, draw = 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    ports::{Agent, playable_moves},
    tictactoe::{BoardState, Player},
};

/// Whether the search cuts branches that cannot change the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pruning {
    #[default]
    AlphaBeta,
    Disabled,
}

/// Result of a root search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Chosen move
    pub mv: usize,
    /// Minimax value of the chosen move for the searching player
    pub score: i32,
    /// Nodes visited during this search
    pub nodes_explored: u64,
}

/// Minimax agent
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    name: String,
    pruning: Pruning,
    nodes_explored: u64,
}

impl MinimaxAgent {
    /// Create an agent using alpha-beta pruning
    pub fn new() -> Self {
        Self::with_pruning(Pruning::AlphaBeta)
    }

    pub fn with_pruning(pruning: Pruning) -> Self {
        let name = match pruning {
            Pruning::AlphaBeta => "Minimax",
            Pruning::Disabled => "Minimax (unpruned)",
        };
        Self {
            name: name.to_string(),
            pruning,
            nodes_explored: 0,
        }
    }

    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Nodes visited by the most recent search
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// Search every legal move and return the best one.
    ///
    /// Moves are tried in ascending order and only a strictly higher score
    /// replaces the current best, so the first optimal move wins ties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on terminal states.
    pub fn evaluate(&mut self, state: &BoardState) -> Result<SearchOutcome> {
        let moves = playable_moves(state)?;
        let me = state.to_move;
        self.nodes_explored = 0;

        let mut best: Option<(usize, i32)> = None;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for mv in moves {
            let child = state.make_move(mv)?;
            let score = self.minimax(&child, me, false, alpha, beta)?;

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            if self.pruning == Pruning::AlphaBeta {
                alpha = alpha.max(score);
            }
        }

        let (mv, score) = best.ok_or(Error::EmptyMoveSet)?;
        debug!(
            state = %state.encode(),
            mv,
            score,
            nodes = self.nodes_explored,
            "minimax decision"
        );

        Ok(SearchOutcome {
            mv,
            score,
            nodes_explored: self.nodes_explored,
        })
    }

    /// Minimax value of `state` for `player`, searched with a full window.
    ///
    /// Works on terminal states too, where it is the plain terminal score.
    pub fn value(&mut self, state: &BoardState, player: Player) -> Result<i32> {
        self.nodes_explored = 0;
        let maximizing = state.to_move == player;
        self.minimax(state, player, maximizing, i32::MIN, i32::MAX)
    }

    fn terminal_score(state: &BoardState, me: Player) -> Option<i32> {
        match state.winner() {
            Some(winner) if winner == me => Some(1),
            Some(_) => Some(-1),
            None if state.is_terminal() => Some(0),
            None => None,
        }
    }

    fn minimax(
        &mut self,
        state: &BoardState,
        me: Player,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32> {
        self.nodes_explored += 1;

        if let Some(score) = Self::terminal_score(state, me) {
            return Ok(score);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::EmptyMoveSet);
        }
        let prune = self.pruning == Pruning::AlphaBeta;

        if maximizing {
            let mut max_score = i32::MIN;
            for mv in moves {
                let child = state.make_move(mv)?;
                let score = self.minimax(&child, me, false, alpha, beta)?;
                max_score = max_score.max(score);

                if prune {
                    alpha = alpha.max(max_score);
                    if beta <= alpha {
                        break; // Beta cut-off
                    }
                }
            }
            Ok(max_score)
        } else {
            let mut min_score = i32::MAX;
            for mv in moves {
                let child = state.make_move(mv)?;
                let score = self.minimax(&child, me, true, alpha, beta)?;
                min_score = min_score.min(score);

                if prune {
                    beta = beta.min(min_score);
                    if beta <= alpha {
                        break; // Alpha cut-off
                    }
                }
            }
            Ok(min_score)
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MinimaxAgent {
    fn decide(&mut self, state: &BoardState) -> Result<usize> {
        self.evaluate(state).map(|outcome| outcome.mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_immediate_win() {
        let state = BoardState::from_values(&[1, 1, 0, -1, -1, 0, 0, 0, 0]).unwrap();
        let outcome = MinimaxAgent::new().evaluate(&state).unwrap();
        assert_eq!(outcome.mv, 2);
        assert_eq!(outcome.score, 1);
    }

    #[test]
    fn blocks_when_it_cannot_win() {
        // X threatens column 2, O to move with no win of its own
        // ..X
        // .OX
        // ...
        let state = BoardState::from_string("..X.OX...").unwrap();
        let outcome = MinimaxAgent::new().evaluate(&state).unwrap();
        assert_eq!(outcome.mv, 8);
    }

    #[test]
    fn empty_board_is_a_draw() {
        let mut agent = MinimaxAgent::new();
        let outcome = agent.evaluate(&BoardState::new()).unwrap();
        assert_eq!(outcome.score, 0);
        assert!([0, 2, 4, 6, 8].contains(&outcome.mv));
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let state = BoardState::new();
        let pruned = MinimaxAgent::new().evaluate(&state).unwrap();
        let full = MinimaxAgent::with_pruning(Pruning::Disabled)
            .evaluate(&state)
            .unwrap();

        assert_eq!(pruned.mv, full.mv);
        assert_eq!(pruned.score, full.score);
        assert!(pruned.nodes_explored < full.nodes_explored);
        // every game path from the empty board, root excluded
        assert_eq!(full.nodes_explored, 549_945);
    }

    #[test]
    fn terminal_value_is_scored_directly() {
        let won = BoardState::from_string("XXXOO....").unwrap();
        let mut agent = MinimaxAgent::new();
        assert_eq!(agent.value(&won, Player::X).unwrap(), 1);
        assert_eq!(agent.value(&won, Player::O).unwrap(), -1);
        assert!(matches!(agent.evaluate(&won), Err(Error::GameOver)));
    }
}
