//! Agent port - the interface every decision maker implements

use crate::{Error, Result, tictactoe::BoardState};

/// Agent trait - unified interface for all decision strategies
///
/// Implemented by:
/// - the random baseline
/// - the rule-based heuristic
/// - minimax with alpha-beta pruning
/// - Monte Carlo Tree Search
/// - the tabular Q-learner
///
/// Agents play whichever side is to move in the state they are given, so one
/// instance can be seated as X in one game and as O in the next.
///
/// # Examples
///
/// ```
/// use tictactoe_agents::{agents::HeuristicAgent, ports::Agent, tictactoe::BoardState};
///
/// let mut agent = HeuristicAgent::new();
/// let mv = agent.decide(&BoardState::new()).unwrap();
/// assert_eq!(mv, 4);
/// ```
pub trait Agent: Send {
    /// Select a move (0-8) for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] for terminal states and
    /// [`Error::EmptyMoveSet`] if no legal move exists.
    fn decide(&mut self, state: &BoardState) -> Result<usize>;

    /// Get the agent's name.
    ///
    /// Used for identification in matchups, standings and logging.
    fn name(&self) -> &str;

    /// Receive the terminal reward (+1 win, -1 loss, 0 draw) for the game that
    /// just ended.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for agents that do not learn.
    fn observe_outcome(&mut self, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Switch between training (exploring, recording) and evaluation play.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn set_training(&mut self, _training: bool) {}
}

/// Legal moves of a state an agent was asked to act on.
///
/// # Errors
///
/// Returns [`Error::GameOver`] for terminal states and [`Error::EmptyMoveSet`]
/// when a non-terminal state reports no empty cell.
pub fn playable_moves(state: &BoardState) -> Result<Vec<usize>> {
    if state.is_terminal() {
        return Err(Error::GameOver);
    }
    let moves = state.legal_moves();
    if moves.is_empty() {
        return Err(Error::EmptyMoveSet);
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_moves_rejects_terminal_states() {
        let won = BoardState::from_string("XXXOO....").unwrap();
        assert!(matches!(playable_moves(&won), Err(Error::GameOver)));

        let open = BoardState::from_string("XX.OO....").unwrap();
        assert_eq!(playable_moves(&open).unwrap(), vec![2, 5, 6, 7, 8]);
    }
}
