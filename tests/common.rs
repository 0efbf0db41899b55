//! Common test utilities for the integration suites.
//!
//! Provides exhaustive enumeration of reachable positions and a scripted
//! opponent for deterministic training drills.

#![allow(dead_code)]

use std::collections::HashSet;

use tictactoe_agents::{
    Error, Result,
    pipeline::{TrainingSummary, play_game},
    ports::Agent,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Every position reachable from the empty board by legal play, terminal
/// positions included.
pub fn reachable_states() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut stack = vec![BoardState::new()];
    let mut states = Vec::new();

    while let Some(state) = stack.pop() {
        if !seen.insert(state) {
            continue;
        }
        states.push(state);
        if state.is_terminal() {
            continue;
        }
        for mv in state.legal_moves() {
            stack.push(state.make_move(mv).unwrap());
        }
    }
    states
}

/// Plays the first free cell of a fixed preference order.
pub struct ScriptedAgent {
    order: Vec<usize>,
}

impl ScriptedAgent {
    pub fn new(order: &[usize]) -> Self {
        Self {
            order: order.to_vec(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn decide(&mut self, state: &BoardState) -> Result<usize> {
        self.order
            .iter()
            .copied()
            .find(|&pos| state.is_empty(pos))
            .or_else(|| state.legal_moves().first().copied())
            .ok_or(Error::EmptyMoveSet)
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

/// Play `games` games with `agent` in `seat` and tally its results.
pub fn evaluate(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    seat: Player,
    games: usize,
) -> TrainingSummary {
    let mut summary = TrainingSummary::default();
    for _ in 0..games {
        let game = match seat {
            Player::X => play_game(agent, opponent),
            Player::O => play_game(opponent, agent),
        }
        .unwrap();
        summary.record(game.outcome.unwrap_or(GameOutcome::Draw), seat);
    }
    summary
}
