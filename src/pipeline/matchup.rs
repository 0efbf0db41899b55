//! Single games and two-sided matchups between agents

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    ports::Agent,
    tictactoe::{Game, GameOutcome, Player},
};

/// Play one game from the empty board, `x` opening.
///
/// Both agents are told the terminal reward from their own seat through
/// [`Agent::observe_outcome`].
///
/// # Errors
///
/// Propagates any agent failure and rejects illegal moves with
/// [`crate::Error::IllegalMove`].
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<Game> {
    let mut game = Game::new();

    let outcome = loop {
        if let Some(outcome) = game.outcome {
            break outcome;
        }
        let state = game.current_state();
        let mv = match state.to_move {
            Player::X => x.decide(&state)?,
            Player::O => o.decide(&state)?,
        };
        game.play(mv)?;
    };

    x.observe_outcome(outcome.reward_for(Player::X))?;
    o.observe_outcome(outcome.reward_for(Player::O))?;
    Ok(game)
}

/// Tally of a matchup, seen from the first agent's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupResult {
    pub agent1_wins: usize,
    pub agent2_wins: usize,
    pub draws: usize,
    pub agent1_as_x_wins: usize,
    pub agent1_as_o_wins: usize,
    pub agent2_as_x_wins: usize,
    pub agent2_as_o_wins: usize,
    /// Draws while agent 1 played X
    pub draws_as_x: usize,
    /// Draws while agent 1 played O
    pub draws_as_o: usize,
}

impl MatchupResult {
    pub fn total_games(&self) -> usize {
        self.agent1_wins + self.agent2_wins + self.draws
    }

    /// Fraction of all games won by agent 1.
    pub fn agent1_win_rate(&self) -> f64 {
        rate(self.agent1_wins, self.total_games())
    }

    pub fn agent2_win_rate(&self) -> f64 {
        rate(self.agent2_wins, self.total_games())
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total_games())
    }

    /// Points under 2 per win, 1 per draw: `(agent1, agent2)`.
    pub fn points(&self) -> (usize, usize) {
        (
            self.agent1_wins * 2 + self.draws,
            self.agent2_wins * 2 + self.draws,
        )
    }

    fn record(&mut self, outcome: GameOutcome, agent1_seat: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == agent1_seat => {
                self.agent1_wins += 1;
                match agent1_seat {
                    Player::X => self.agent1_as_x_wins += 1,
                    Player::O => self.agent1_as_o_wins += 1,
                }
            }
            GameOutcome::Win(_) => {
                self.agent2_wins += 1;
                match agent1_seat {
                    Player::X => self.agent2_as_o_wins += 1,
                    Player::O => self.agent2_as_x_wins += 1,
                }
            }
            GameOutcome::Draw => {
                self.draws += 1;
                match agent1_seat {
                    Player::X => self.draws_as_x += 1,
                    Player::O => self.draws_as_o += 1,
                }
            }
        }
    }
}

pub(crate) fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// A series of games with each agent taking both seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub games_per_side: usize,
}

impl Default for Matchup {
    fn default() -> Self {
        Self {
            games_per_side: 100,
        }
    }
}

impl Matchup {
    pub fn new(games_per_side: usize) -> Self {
        Self { games_per_side }
    }

    /// Play `games_per_side` games with `agent1` as X, then as many with
    /// `agent2` as X.
    pub fn run(&self, agent1: &mut dyn Agent, agent2: &mut dyn Agent) -> Result<MatchupResult> {
        let mut result = MatchupResult::default();

        for _ in 0..self.games_per_side {
            let game = play_game(agent1, agent2)?;
            if let Some(outcome) = game.outcome {
                result.record(outcome, Player::X);
            }
        }
        for _ in 0..self.games_per_side {
            let game = play_game(agent2, agent1)?;
            if let Some(outcome) = game.outcome {
                result.record(outcome, Player::O);
            }
        }

        debug!(
            agent1 = agent1.name(),
            agent2 = agent2.name(),
            agent1_wins = result.agent1_wins,
            agent2_wins = result.agent2_wins,
            draws = result.draws,
            "Matchup complete"
        );
        Ok(result)
    }
}
