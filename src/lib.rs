//! Tic-tac-toe game-playing agents
//!
//! This crate provides:
//! - A compact tic-tac-toe state with move generation and win detection
//! - Baseline agents: uniform random and a rule-based heuristic
//! - Exhaustive minimax with alpha-beta pruning
//! - Monte Carlo Tree Search with UCB1 selection and random rollouts
//! - Tabular Q-learning with a persistent Q-table
//! - Matchups, a round-robin tournament and the Q-learning training schedule
//!
//! All agents implement [`ports::Agent`] and play whichever side is to move.

pub mod agents;
pub mod cli;
pub mod error;
pub mod mcts;
pub mod minimax;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
