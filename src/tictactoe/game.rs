//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal state, `None` while the game is still running.
    pub fn of(state: &BoardState) -> Option<Self> {
        if let Some(winner) = state.winner() {
            Some(GameOutcome::Win(winner))
        } else if state.is_terminal() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Terminal reward for `role`: +1 win, -1 loss, 0 draw
    pub fn reward_for(self, role: Player) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == role => 1.0,
            GameOutcome::Win(_) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    state: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Game {
            state: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the side to move
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once the game has an outcome and
    /// [`crate::Error::IllegalMove`] for out-of-range or occupied cells.
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let next = self.state.make_move(position)?;
        self.moves.push(Move {
            position,
            player: self.state.to_move,
        });
        self.state = next;
        self.outcome = GameOutcome::of(&next);

        Ok(())
    }

    /// Current board state
    pub fn current_state(&self) -> BoardState {
        self.state
    }

    /// Move positions in play order
    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_records_moves_and_outcome() {
        let mut game = Game::new();
        for pos in [4, 0, 1, 3, 7] {
            game.play(pos).unwrap();
        }

        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.positions(), vec![4, 0, 1, 3, 7]);
        assert_eq!(game.moves[1].player, Player::O);
        assert_eq!(game.current_state().legal_moves(), vec![2, 5, 6, 8]);
    }

    #[test]
    fn play_after_game_over_is_rejected() {
        let mut game = Game::new();
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }
        assert!(matches!(game.play(8), Err(crate::Error::GameOver)));
    }

    #[test]
    fn rewards_follow_the_role() {
        let x_wins = GameOutcome::Win(Player::X);
        assert_eq!(x_wins.reward_for(Player::X), 1.0);
        assert_eq!(x_wins.reward_for(Player::O), -1.0);
        assert_eq!(GameOutcome::Draw.reward_for(Player::O), 0.0);
    }
}
